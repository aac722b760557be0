//! Server-rendered HTML pages.
//!
//! Every dynamic value is escaped on output, including values that were
//! already escaped when the form was submitted.

pub mod entities;

use axum::http::StatusCode;

use crate::logic::crud::Page;
use crate::logic::entity::{CatalogEntity, DeleteTarget};
use crate::logic::form::escape;
use crate::logic::index::CatalogCounts;
use crate::model::{detail_path, Record};

/// HTML-escaped text.
pub fn text(value: &str) -> String {
    escape(value)
}

/// Per-entity fragments used by [`render`].
pub trait EntityView: CatalogEntity {
    /// Heading of the dependents section; empty when the entity has none.
    const DEPENDENTS_HEADING: &'static str = "";

    fn list_item(item: &Self::Listing) -> String;
    fn detail_body(detail: &Self::Detail) -> String;
    fn dependent_item(_dependent: &Self::Dependent) -> String {
        String::new()
    }
    fn form_fields(input: &Self::Input, choices: &Self::Choices) -> String;
}

pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/stylesheets/style.css">
</head>
<body>
    <nav>
        <ul>
            <li><a href="/catalog">Home</a></li>
            <li><a href="/catalog/shoes">All shoes</a></li>
            <li><a href="/catalog/brands">All brands</a></li>
            <li><a href="/catalog/types">All types</a></li>
            <li><a href="/catalog/shoeinstances">All shoe instances</a></li>
            <li><hr></li>
            <li><a href="/catalog/brand/create">Create new brand</a></li>
            <li><a href="/catalog/type/create">Create new type</a></li>
            <li><a href="/catalog/shoe/create">Create new shoe</a></li>
            <li><a href="/catalog/shoeinstance/create">Create new shoe instance</a></li>
        </ul>
    </nav>
    <main>
{body}
    </main>
</body>
</html>
"#,
        title = text(title),
        body = body
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(
        message,
        &format!(
            "<h1>{}</h1>\n<h2>{}</h2>",
            text(message),
            status.as_u16()
        ),
    )
}

pub fn index_page(counts: &CatalogCounts) -> String {
    let body = format!(
        r#"<h1>Inventory Application Home</h1>
<p>Welcome to the shoe inventory.</p>
<h2>Dynamic content</h2>
<p>The catalog has the following record counts:</p>
<ul>
    <li><strong>Shoes:</strong> {}</li>
    <li><strong>Shoe instances:</strong> {}</li>
    <li><strong>Brands:</strong> {}</li>
    <li><strong>Types:</strong> {}</li>
</ul>"#,
        counts.shoes, counts.shoe_instances, counts.brands, counts.types
    );
    layout("Inventory Application Home", &body)
}

fn bullet_list(items: Vec<String>) -> String {
    let mut html = String::from("<ul>\n");
    for item in items {
        html.push_str(&format!("    <li>{}</li>\n", item));
    }
    html.push_str("</ul>");
    html
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    format!(
        "<ul class=\"errors\">\n{}\n</ul>",
        errors
            .iter()
            .map(|e| format!("    <li>{}</li>", text(e)))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn dependents_section<E: EntityView>(dependents: &[E::Dependent]) -> String {
    if E::DEPENDENTS_HEADING.is_empty() {
        return String::new();
    }
    if dependents.is_empty() {
        return format!(
            "<h4>{}</h4>\n<p>This {} has no {}.</p>",
            E::DEPENDENTS_HEADING,
            E::LABEL.to_lowercase(),
            E::DEPENDENTS_HEADING.to_lowercase()
        );
    }
    format!(
        "<h4>{}</h4>\n{}",
        E::DEPENDENTS_HEADING,
        bullet_list(dependents.iter().map(E::dependent_item).collect())
    )
}

pub fn render<E: EntityView>(page: &Page<E>) -> String {
    match page {
        Page::List { title, items } => {
            let list = if items.is_empty() {
                format!("<p>There are no {}s.</p>", E::LABEL.to_lowercase())
            } else {
                bullet_list(items.iter().map(E::list_item).collect())
            };
            layout(title, &format!("<h1>{}</h1>\n{}", text(title), list))
        }
        Page::Detail {
            title,
            detail,
            dependents,
        } => {
            let path = detail_path(E::detail_record(detail));
            let body = format!(
                "<h1>{}</h1>\n{}\n{}\n<hr>\n<p><a href=\"{path}/update\">Update {label}</a></p>\n<p><a href=\"{path}/delete\">Delete {label}</a></p>",
                text(title),
                E::detail_body(detail),
                dependents_section::<E>(dependents),
                path = path,
                label = E::LABEL.to_lowercase(),
            );
            layout(title, &body)
        }
        Page::Form {
            title,
            input,
            choices,
            errors,
        } => {
            let body = format!(
                "<h1>{}</h1>\n<form method=\"POST\">\n{}\n    <button type=\"submit\">Submit</button>\n</form>\n{}",
                text(title),
                E::form_fields(input, choices),
                error_list(errors)
            );
            layout(title, &body)
        }
        Page::ConfirmDelete {
            title,
            detail,
            dependents,
        } => {
            let record = E::detail_record(detail);
            let label = E::LABEL.to_lowercase();
            let action = if dependents.is_empty() {
                let field = match E::DELETE_TARGET {
                    DeleteTarget::BodyField(field) => field,
                    DeleteTarget::Path => "id",
                };
                format!(
                    "<p>Do you really want to delete this {label}?</p>\n<form method=\"POST\">\n    <input type=\"hidden\" name=\"{field}\" value=\"{id}\">\n    <button type=\"submit\">Delete</button>\n</form>",
                    label = label,
                    field = field,
                    id = text(record.id()),
                )
            } else {
                format!(
                    "<p><strong>Delete the following {} before attempting to delete this {}.</strong></p>\n{}",
                    E::DEPENDENTS_HEADING.to_lowercase(),
                    label,
                    bullet_list(dependents.iter().map(E::dependent_item).collect())
                )
            };
            let body = format!(
                "<h1>{}</h1>\n{}\n{}",
                text(title),
                E::detail_body(detail),
                action
            );
            layout(title, &body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Brand, ShoeSummary};

    fn brand() -> Brand {
        Brand {
            id: "b1".to_string(),
            name: "Vans".to_string(),
            country: "USA".to_string(),
            established: None,
        }
    }

    #[test]
    fn test_confirm_delete_offers_form_without_dependents() {
        let page: Page<Brand> = Page::ConfirmDelete {
            title: "Delete Brand".to_string(),
            detail: brand(),
            dependents: Vec::new(),
        };
        let html = render(&page);
        assert!(html.contains(r#"<input type="hidden" name="brandid" value="b1">"#));
    }

    #[test]
    fn test_confirm_delete_lists_blocking_dependents() {
        let page: Page<Brand> = Page::ConfirmDelete {
            title: "Delete Brand".to_string(),
            detail: brand(),
            dependents: vec![ShoeSummary {
                id: "s1".to_string(),
                name: "Old Skool".to_string(),
                description: "-".to_string(),
                price: 85.0,
            }],
        };
        let html = render(&page);
        assert!(html.contains("Delete the following shoes before attempting to delete this brand."));
        assert!(html.contains("Old Skool"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(StatusCode::NOT_FOUND, "<Brand> not found");
        assert!(html.contains("&lt;Brand&gt; not found"));
        assert!(html.contains("<h2>404</h2>"));
    }
}
