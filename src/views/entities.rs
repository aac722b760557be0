use itertools::Itertools;
use std::convert::Infallible;

use crate::logic::brand::BrandInput;
use crate::logic::shoe::{ShoeChoices, ShoeInput};
use crate::logic::shoe_instance::{ShoeInstanceChoices, ShoeInstanceInput};
use crate::logic::shoe_type::ShoeTypeInput;
use crate::model::{
    detail_path, established_formatted, Brand, Color, Shoe, ShoeDetail, ShoeInstance,
    ShoeInstanceDetail, ShoeListing, ShoeSummary, ShoeType, Size,
};
use crate::views::{text, EntityView};

fn link<R: crate::model::Record>(record: &R, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", detail_path(record), text(label))
}

fn text_input(name: &str, label: &str, value: &str, kind: &str) -> String {
    format!(
        "    <div class=\"form-group\">\n        <label for=\"{name}\">{label}:</label>\n        <input id=\"{name}\" type=\"{kind}\" name=\"{name}\" value=\"{value}\">\n    </div>",
        name = name,
        label = label,
        kind = kind,
        value = text(value),
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>",
        text(value),
        if selected { " selected" } else { "" },
        text(label)
    )
}

fn select(name: &str, label: &str, mut options: impl Iterator<Item = String>) -> String {
    format!(
        "    <div class=\"form-group\">\n        <label for=\"{name}\">{label}:</label>\n        <select id=\"{name}\" name=\"{name}\">\n            <option value=\"\">--Please select--</option>\n            {options}\n        </select>\n    </div>",
        name = name,
        label = label,
        options = options.join("\n            "),
    )
}

fn summary_item(shoe: &ShoeSummary) -> String {
    format!(
        "{} <span>{}</span> <span>${}</span>",
        link(shoe, &shoe.name),
        text(&shoe.description),
        shoe.price
    )
}

impl EntityView for Brand {
    const DEPENDENTS_HEADING: &'static str = "Shoes";

    fn list_item(brand: &Brand) -> String {
        let established = established_formatted(brand);
        if established.is_empty() {
            format!("{} ({})", link(brand, &brand.name), text(&brand.country))
        } else {
            format!(
                "{} ({}, est. {})",
                link(brand, &brand.name),
                text(&brand.country),
                established
            )
        }
    }

    fn detail_body(brand: &Brand) -> String {
        format!(
            "<p><strong>Name:</strong> {}</p>\n<p><strong>Country:</strong> {}</p>\n<p><strong>Established:</strong> {}</p>",
            text(&brand.name),
            text(&brand.country),
            established_formatted(brand)
        )
    }

    fn dependent_item(shoe: &ShoeSummary) -> String {
        summary_item(shoe)
    }

    fn form_fields(input: &BrandInput, _choices: &()) -> String {
        [
            text_input("name", "Name", &input.name, "text"),
            text_input("country", "Country", &input.country, "text"),
            text_input("established", "Established", &input.established, "date"),
        ]
        .join("\n")
    }
}

impl EntityView for ShoeType {
    const DEPENDENTS_HEADING: &'static str = "Shoes";

    fn list_item(shoe_type: &ShoeType) -> String {
        link(shoe_type, &shoe_type.name)
    }

    fn detail_body(shoe_type: &ShoeType) -> String {
        format!("<p><strong>Name:</strong> {}</p>", text(&shoe_type.name))
    }

    fn dependent_item(shoe: &ShoeSummary) -> String {
        summary_item(shoe)
    }

    fn form_fields(input: &ShoeTypeInput, _choices: &()) -> String {
        text_input("name", "Type", &input.name, "text")
    }
}

impl EntityView for Shoe {
    const DEPENDENTS_HEADING: &'static str = "Instances";

    fn list_item(listing: &ShoeListing) -> String {
        match &listing.brand {
            Some(brand) => format!("{} ({})", link(&listing.shoe, &listing.shoe.name), text(&brand.name)),
            None => link(&listing.shoe, &listing.shoe.name),
        }
    }

    fn detail_body(detail: &ShoeDetail) -> String {
        let brand = detail
            .brand
            .as_ref()
            .map(|brand| link(brand, &brand.name))
            .unwrap_or_default();
        let types = detail
            .types
            .iter()
            .map(|shoe_type| link(shoe_type, &shoe_type.name))
            .join(", ");
        format!(
            "<p><strong>Brand:</strong> {}</p>\n<p><strong>Description:</strong> {}</p>\n<p><strong>Price:</strong> ${}</p>\n<p><strong>Type:</strong> {}</p>",
            brand,
            text(&detail.shoe.description),
            detail.shoe.price,
            types
        )
    }

    fn dependent_item(instance: &ShoeInstance) -> String {
        format!(
            "{} <span>Size {}</span>",
            link(instance, instance.color.as_str()),
            instance.size
        )
    }

    fn form_fields(input: &ShoeInput, choices: &ShoeChoices) -> String {
        let brands = choices
            .brands
            .iter()
            .map(|entry| option(&entry.item.id, &entry.item.name, entry.selected));
        let types = choices
            .types
            .iter()
            .map(|entry| {
                format!(
                    "<label><input type=\"checkbox\" name=\"type\" value=\"{}\"{}> {}</label>",
                    text(&entry.item.id),
                    if entry.selected { " checked" } else { "" },
                    text(&entry.item.name)
                )
            })
            .join("\n        ");

        [
            text_input("name", "Name", &input.name, "text"),
            select("brand", "Brand", brands),
            format!(
                "    <div class=\"form-group\">\n        <label for=\"description\">Description:</label>\n        <textarea id=\"description\" name=\"description\">{}</textarea>\n    </div>",
                text(&input.description)
            ),
            text_input("price", "Price", &input.price, "text"),
            format!("    <div class=\"form-group\">\n        <span>Type:</span>\n        {}\n    </div>", types),
        ]
        .join("\n")
    }
}

impl EntityView for ShoeInstance {
    fn list_item(listing: &ShoeInstanceDetail) -> String {
        let name = listing
            .shoe
            .as_ref()
            .map(|shoe| shoe.name.as_str())
            .unwrap_or("Unknown shoe");
        format!(
            "{} <span>{} / size {}</span>",
            link(&listing.instance, name),
            listing.instance.color,
            listing.instance.size
        )
    }

    fn detail_body(detail: &ShoeInstanceDetail) -> String {
        let shoe = detail
            .shoe
            .as_ref()
            .map(|shoe| link(shoe, &shoe.name))
            .unwrap_or_default();
        format!(
            "<p><strong>Shoe:</strong> {}</p>\n<p><strong>Color:</strong> {}</p>\n<p><strong>Size:</strong> {}</p>\n<p><strong>Id:</strong> {}</p>",
            shoe,
            detail.instance.color,
            detail.instance.size,
            text(&detail.instance.id)
        )
    }

    fn dependent_item(dependent: &Infallible) -> String {
        match *dependent {}
    }

    fn form_fields(input: &ShoeInstanceInput, choices: &ShoeInstanceChoices) -> String {
        let shoes = choices
            .shoes
            .iter()
            .map(|entry| option(&entry.item.id, &entry.item.name, entry.selected));
        let colors = Color::ALL
            .iter()
            .map(|color| option(color.as_str(), color.as_str(), input.color == color.as_str()));
        let sizes = Size::ALL.iter().map(|size| {
            let value = size.to_string();
            option(&value, &value, input.size == value)
        });

        [
            select("shoe", "Shoe", shoes),
            select("color", "Color", colors),
            select("size", "Size", sizes),
        ]
        .join("\n")
    }
}
