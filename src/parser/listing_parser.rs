// Extraction-rule interpreter for the availability page HTML
use crate::config::{CardRule, ExtractionRule, TableRule};
use crate::model::{CardListing, Listing, ParseError};
use crate::parser::suppress_if_all_empty;

use scraper::{ElementRef, Html, Selector};

pub struct ListingParser;

impl ListingParser {
    pub fn new() -> Self {
        Self
    }

    /// Extracts listings according to the configured rule, then normalizes
    /// semantically-empty result sets to an empty sequence.
    pub fn parse(&self, html: &str, rule: &ExtractionRule) -> Result<Vec<Listing>, ParseError> {
        let document = Html::parse_document(html);
        let listings = match rule {
            ExtractionRule::Table(r) => parse_table(&document, r)?,
            ExtractionRule::Card(r) => parse_cards(&document, r)?,
        };
        Ok(suppress_if_all_empty(listings, rule.empty_sentinel()))
    }
}

fn parse_table(document: &Html, rule: &TableRule) -> Result<Vec<Listing>, ParseError> {
    let table_sel = sel(&rule.table)?;
    let row_sel = sel(&rule.row)?;
    let cell_sel = sel(&rule.cell)?;

    let mut listings = Vec::new();
    for container in &rule.containers {
        let container_sel = sel(container)?;
        for wrapper in document.select(&container_sel) {
            for table in wrapper.select(&table_sel) {
                for row in table.select(&row_sel) {
                    let cells: Vec<String> = row.select(&cell_sel).map(element_text).collect();
                    if !cells.is_empty() {
                        listings.push(Listing::Row(cells));
                    }
                }
            }
        }
    }
    Ok(listings)
}

fn parse_cards(document: &Html, rule: &CardRule) -> Result<Vec<Listing>, ParseError> {
    let summary_sel = sel(&rule.summary)?;
    // A vanished summary element means the page layout drifted. That must
    // stay distinguishable from a legitimate zero-results page.
    let summary = document.select(&summary_sel).next().ok_or_else(|| {
        ParseError::LayoutChanged(format!("summary element {:?} not found", rule.summary))
    })?;
    if element_text(summary).starts_with(&rule.zero_results_marker) {
        return Ok(Vec::new());
    }

    let card_sel = sel(&rule.card)?;
    let plan_sel = sel(&rule.plan)?;
    let room_sel = sel(&rule.room)?;
    let image_sel = sel(&rule.image)?;
    let date_range_sel = sel(&rule.date_range)?;
    let time_text_sel = sel(&rule.time_text)?;
    let total_price_sel = sel(&rule.total_price)?;
    let individual_price_sel = sel(&rule.individual_price)?;

    let mut listings = Vec::new();
    for card in document.select(&card_sel) {
        // Check-in and check-out share one text class with the date range's
        // own text node; they sit at positions 1 and 2 of the match list.
        let mut times = card.select(&time_text_sel);
        let check_in = times.nth(1).map(element_text);
        let check_out = times.next().map(element_text);

        listings.push(Listing::Card(CardListing {
            plan: first_text(card, &plan_sel),
            room: first_text(card, &room_sel),
            image_url: card
                .select(&image_sel)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(str::to_string),
            date_range: first_text(card, &date_range_sel),
            check_in,
            check_out,
            total_price: first_text(card, &total_price_sel),
            individual_price: card
                .select(&individual_price_sel)
                .nth(rule.individual_price_index)
                .map(element_text),
        }));
    }
    Ok(listings)
}

fn sel(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::BadSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_rule(sentinel: Option<&str>) -> ExtractionRule {
        ExtractionRule::Table(TableRule {
            containers: vec![
                "div[style='overflow:auto; white-space: nowrap;']".to_string(),
                "div[style='overflow-x:auto; white-space: nowrap;']".to_string(),
            ],
            table: "table.general".to_string(),
            row: "tbody tr".to_string(),
            cell: "td".to_string(),
            empty_sentinel: sentinel.map(str::to_string),
        })
    }

    fn card_rule() -> ExtractionRule {
        ExtractionRule::Card(CardRule {
            card: "div.plan-card".to_string(),
            summary: "p.result-count".to_string(),
            zero_results_marker: "0".to_string(),
            plan: "h3.plan-name".to_string(),
            room: "p.room-detail".to_string(),
            image: "img.plan-photo".to_string(),
            date_range: "span.stay-period".to_string(),
            time_text: "span.time-text".to_string(),
            total_price: "span.total-price".to_string(),
            individual_price: "span.price-detail".to_string(),
            individual_price_index: 1,
            empty_sentinel: None,
        })
    }

    const TABLE_PAGE: &str = r#"
        <html><body>
        <div style="overflow:auto; white-space: nowrap;">
          <table class="general"><tbody>
            <tr><td> Single </td><td> 2026-09-01 </td><td> 8,000円 </td></tr>
          </tbody></table>
        </div>
        <div style="overflow-x:auto; white-space: nowrap;">
          <table class="general"><tbody>
            <tr><td>Twin</td><td>2026-09-02</td><td>12,000円</td></tr>
          </tbody></table>
        </div>
        </body></html>
    "#;

    const CARD_PAGE: &str = r#"
        <html><body>
        <p class="result-count">2件</p>
        <div class="plan-card">
          <h3 class="plan-name">Early Bird</h3>
          <p class="room-detail">Double, non-smoking</p>
          <img class="plan-photo" src="https://img.example/plan1.jpg">
          <span class="stay-period">
            9/1 - 9/2
            <span class="time-text">period</span>
          </span>
          <span class="time-text">15:00</span>
          <span class="time-text">10:00</span>
          <span class="total-price">16,000円</span>
          <span class="price-detail">16,000円</span>
          <span class="price-detail">8,000円</span>
        </div>
        <div class="plan-card">
          <h3 class="plan-name">Last Minute</h3>
          <p class="room-detail">Single</p>
          <span class="stay-period">
            9/3 - 9/4
            <span class="time-text">period</span>
          </span>
          <span class="time-text">16:00</span>
          <span class="time-text">11:00</span>
          <span class="total-price">9,000円</span>
          <span class="price-detail">9,000円</span>
          <span class="price-detail">9,000円</span>
        </div>
        </body></html>
    "#;

    #[test]
    fn table_strategy_reads_both_legacy_containers() {
        let parser = ListingParser::new();
        let listings = parser.parse(TABLE_PAGE, &table_rule(None)).unwrap();

        assert_eq!(
            listings,
            vec![
                Listing::Row(vec![
                    "Single".to_string(),
                    "2026-09-01".to_string(),
                    "8,000円".to_string(),
                ]),
                Listing::Row(vec![
                    "Twin".to_string(),
                    "2026-09-02".to_string(),
                    "12,000円".to_string(),
                ]),
            ]
        );
    }

    #[test]
    fn table_strategy_with_no_containers_is_empty() {
        let parser = ListingParser::new();
        let listings = parser
            .parse("<html><body><p>maintenance</p></body></html>", &table_rule(None))
            .unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn all_sentinel_rows_are_suppressed() {
        let html = r#"
            <div style="overflow:auto; white-space: nowrap;">
              <table class="general"><tbody>
                <tr><td>空室は現在見つかっていません。</td><td>空室は現在見つかっていません。</td></tr>
                <tr><td>空室は現在見つかっていません。</td></tr>
              </tbody></table>
            </div>
        "#;
        let parser = ListingParser::new();
        let rule = table_rule(Some("空室は現在見つかっていません。"));
        assert!(parser.parse(html, &rule).unwrap().is_empty());
    }

    #[test]
    fn one_real_row_survives_sentinel_filter() {
        let html = r#"
            <div style="overflow:auto; white-space: nowrap;">
              <table class="general"><tbody>
                <tr><td>空室は現在見つかっていません。</td></tr>
                <tr><td>Twin</td><td>2026-09-02</td></tr>
              </tbody></table>
            </div>
        "#;
        let parser = ListingParser::new();
        let rule = table_rule(Some("空室は現在見つかっていません。"));
        assert_eq!(parser.parse(html, &rule).unwrap().len(), 2);
    }

    #[test]
    fn card_strategy_marks_missing_fields_absent() {
        let parser = ListingParser::new();
        let listings = parser.parse(CARD_PAGE, &card_rule()).unwrap();
        assert_eq!(listings.len(), 2);

        let Listing::Card(first) = &listings[0] else {
            panic!("expected card listing");
        };
        assert_eq!(first.plan.as_deref(), Some("Early Bird"));
        assert_eq!(
            first.image_url.as_deref(),
            Some("https://img.example/plan1.jpg")
        );
        assert_eq!(first.check_in.as_deref(), Some("15:00"));
        assert_eq!(first.check_out.as_deref(), Some("10:00"));
        assert_eq!(first.individual_price.as_deref(), Some("8,000円"));

        let Listing::Card(second) = &listings[1] else {
            panic!("expected card listing");
        };
        // No photo on the second card: absent, not an error.
        assert_eq!(second.image_url, None);
        assert_eq!(second.plan.as_deref(), Some("Last Minute"));
    }

    #[test]
    fn zero_results_summary_yields_empty() {
        let html = r#"<p class="result-count">0件</p>"#;
        let parser = ListingParser::new();
        assert!(parser.parse(html, &card_rule()).unwrap().is_empty());
    }

    #[test]
    fn missing_summary_is_layout_drift_not_empty() {
        let html = r#"<div class="plan-card"><h3 class="plan-name">Plan</h3></div>"#;
        let parser = ListingParser::new();
        match parser.parse(html, &card_rule()) {
            Err(ParseError::LayoutChanged(_)) => {}
            other => panic!("expected LayoutChanged, got {:?}", other),
        }
    }

    #[test]
    fn bad_selector_is_reported_with_the_selector() {
        let mut rule = match table_rule(None) {
            ExtractionRule::Table(t) => t,
            _ => unreachable!(),
        };
        rule.cell = "td[".to_string();
        let parser = ListingParser::new();
        match parser.parse(TABLE_PAGE, &ExtractionRule::Table(rule)) {
            Err(ParseError::BadSelector { selector, .. }) => assert_eq!(selector, "td["),
            other => panic!("expected BadSelector, got {:?}", other),
        }
    }
}
