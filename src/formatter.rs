use crate::model::{CardListing, Listing};

const MISSING_FIELD: &str = "-";
const CARD_DIVIDER: &str = "--------------------";

/// Renders the run's listings into the single notification body. The source
/// URL goes on the last line so the recipient can open the page directly.
pub fn format_report(listings: &[Listing], url: &str) -> String {
    let mut out = String::new();
    for listing in listings {
        match listing {
            Listing::Row(cells) => {
                out.push_str(&cells.join("\n"));
                out.push_str("\n\n");
            }
            Listing::Card(card) => {
                out.push_str(&format_card(card));
                out.push_str(CARD_DIVIDER);
                out.push('\n');
            }
        }
    }
    out.push_str(url);
    out
}

fn format_card(card: &CardListing) -> String {
    let field = |value: &Option<String>| -> String {
        value.as_deref().unwrap_or(MISSING_FIELD).to_string()
    };
    format!(
        "Plan: {}\nRoom: {}\nImage: {}\nDates: {}\nCheck-in: {}\nCheck-out: {}\nTotal: {}\nPer person: {}\n",
        field(&card.plan),
        field(&card.room),
        field(&card.image_url),
        field(&card.date_range),
        field(&card.check_in),
        field(&card.check_out),
        field(&card.total_price),
        field(&card.individual_price),
    )
}
