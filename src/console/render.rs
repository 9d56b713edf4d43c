use crate::core::{ListStatus, RestaurantCard};
use std::fmt::Write;

/// Render one result card as plain text
pub fn render_card(index: usize, card: &RestaurantCard) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{:>3}. {}  ⭐ {}  {}", index, card.name, card.rating, card.budget);
    if !card.address.is_empty() {
        let _ = writeln!(out, "     {}", card.address);
    }
    if !card.cuisines.is_empty() {
        let _ = writeln!(out, "     Cuisines: {}", card.cuisines.join(", "));
    }
    let _ = writeln!(out, "     Menu items: {}", card.matching_items.join(", "));
    if let Some(phone) = &card.phone {
        let _ = writeln!(out, "     Phone: {}", phone);
    }
    if let Some(menu) = &card.menu_link {
        let _ = writeln!(out, "     Menu: {}", menu);
    }
    if let Some(site) = &card.website_url {
        let _ = writeln!(out, "     Website: {}", site);
    }
    let _ = writeln!(out, "     Image: {}", card.image_url);

    out
}

/// Render a page of cards plus the list footer
pub fn render_list(header: &str, cards: &[RestaurantCard], status: ListStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", header);

    for (i, card) in cards.iter().enumerate() {
        out.push_str(&render_card(i + 1, card));
    }

    match status.end_message() {
        Some(message) => {
            let _ = writeln!(out, "{}", message);
        }
        None => {
            let _ = writeln!(out, "(type `more` for more restaurants)");
        }
    }

    out
}
