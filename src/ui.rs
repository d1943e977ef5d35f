use std::io::{self, BufRead, Write};

use crate::models::{Product, CATEGORY_OPTIONS};
use crate::notify::{Notification, Severity};
use crate::session::{FormSession, Mode};
use crate::store::CatalogStore;

/// Interactive single-view loop: product table on top, form prompts below,
/// driven by add / edit / delete commands until quit or end of input.
pub fn run(store: &mut CatalogStore) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(store, &mut stdin.lock(), &mut stdout.lock())
}

fn run_loop<R, W>(store: &mut CatalogStore, input: &mut R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut session = FormSession::new();

    loop {
        writeln!(out)?;
        out.write_all(render_table(store.products()).as_bytes())?;
        match session.mode() {
            Mode::Creating => writeln!(out, "Mode: adding a new product")?,
            Mode::Editing(id) => writeln!(out, "Mode: editing product #{}", id)?,
        }
        writeln!(out, "Commands: add | edit <row> | delete <row> | cancel | quit")?;
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else { break };
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let arg = words.next();

        match command {
            "" => continue,
            "add" => {
                // the add flow always starts from a blank Creating form,
                // even when a rejected edit left the session in Editing
                session.cancel();
                fill_form(&mut session, input, out)?;
                let notice = session.submit(store);
                print_notice(out, &notice)?;
                print_field_errors(&session, out)?;
            }
            "edit" => {
                let Some(product) = product_at(store, arg).cloned() else {
                    writeln!(out, "No such row.")?;
                    continue;
                };
                session.begin_edit(&product);
                fill_form(&mut session, input, out)?;
                let notice = session.submit(store);
                print_notice(out, &notice)?;
                print_field_errors(&session, out)?;
            }
            "delete" => {
                let Some(product) = product_at(store, arg).cloned() else {
                    writeln!(out, "No such row.")?;
                    continue;
                };
                write!(out, "Delete product \"{}\"? (y/n) ", product.name)?;
                out.flush()?;
                let Some(answer) = read_line(input)? else { break };
                if !is_yes(&answer) {
                    continue;
                }
                if let Some(notice) = session.delete(store, product.id) {
                    print_notice(out, &notice)?;
                }
            }
            "cancel" => session.cancel(),
            "quit" | "q" | "exit" => break,
            _ => writeln!(out, "Unknown command: {}", command)?,
        }
    }

    Ok(())
}

// Prompts every field in order; an empty answer keeps the current value.
fn fill_form<R, W>(session: &mut FormSession, input: &mut R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let categories = CATEGORY_OPTIONS
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let category_label = format!("Category ({})", categories);

    let prompts: [(&str, fn(&crate::form::ProductForm) -> String); 6] = [
        ("Name", |f| f.name.clone()),
        ("Description", |f| f.description.clone()),
        ("Price", |f| f.price.clone()),
        ("Category", |f| f.category.clone()),
        ("Release date (YYYY-MM-DD)", |f| f.release_date.clone()),
        ("Stock (0-1000)", |f| f.stock.clone()),
    ];

    for (index, (label, current)) in prompts.iter().enumerate() {
        let shown = if index == 3 { category_label.as_str() } else { *label };
        let existing = current(session.form());
        write!(out, "{} [{}]: ", shown, existing)?;
        out.flush()?;
        let Some(answer) = read_line(input)? else { return Ok(()) };
        if answer.trim().is_empty() {
            continue;
        }
        let form = session.form_mut();
        match index {
            0 => form.name = answer,
            1 => form.description = answer,
            2 => form.price = answer,
            3 => form.category = answer,
            4 => form.release_date = answer,
            _ => form.stock = answer,
        }
    }

    let active = session.form().active;
    write!(out, "Active? (y/n) [{}]: ", if active { "y" } else { "n" })?;
    out.flush()?;
    if let Some(answer) = read_line(input)? {
        let answer = answer.trim();
        if !answer.is_empty() {
            session.form_mut().active = is_yes(answer);
        }
    }
    Ok(())
}

fn product_at<'a>(store: &'a CatalogStore, arg: Option<&str>) -> Option<&'a Product> {
    let row: usize = arg?.parse().ok()?;
    store.products().get(row.checked_sub(1)?)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "true")
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn print_notice<W: Write>(out: &mut W, notice: &Notification) -> io::Result<()> {
    let tag = match notice.severity {
        Severity::Success => "ok",
        Severity::Danger => "error",
    };
    writeln!(out, "[{}] {}", tag, notice.message)
}

fn print_field_errors<W: Write>(session: &FormSession, out: &mut W) -> io::Result<()> {
    for (field, message) in session.errors() {
        writeln!(out, "  {}: {}", field, message)?;
    }
    Ok(())
}

fn render_table(products: &[Product]) -> String {
    let mut table = String::new();
    table.push_str(&format!(
        "{:<4} {:<24} {:>16} {:<12} {:>6} {:<9}\n",
        "#", "Name", "Price", "Category", "Stock", "Status"
    ));
    if products.is_empty() {
        table.push_str("No products yet.\n");
        return table;
    }
    for (index, product) in products.iter().enumerate() {
        table.push_str(&format!(
            "{:<4} {:<24} {:>16} {:<12} {:>6} {:<9}\n",
            index + 1,
            product.name,
            format_price(product.price),
            product.category.to_string(),
            product.stock,
            if product.active { "Active" } else { "Inactive" },
        ));
    }
    table
}

// Rp with dot thousands grouping, cents only when present. Rounded to two
// decimals up front so .995 and up carries into the whole part.
fn format_price(price: f64) -> String {
    let total_cents = (price * 100.0).round() as i64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    if cents > 0 {
        format!("Rp {},{:02}", grouped, cents)
    } else {
        format!("Rp {}", grouped)
    }
}
