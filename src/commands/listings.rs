use super::AppContext;
use crate::models::Listing;
use crate::utils::format::format_currency;
use crate::utils::{Align, Page, Table};

const LISTINGS_PER_PAGE: usize = 10;

/// Parse listing arguments: a number is the page, anything else the model
pub fn parse_listing_args(args: &[&str]) -> (Option<String>, usize) {
    let mut model_parts: Vec<&str> = Vec::new();
    let mut page_num = 1;

    for arg in args {
        if let Ok(num) = arg.parse::<usize>() {
            page_num = num;
            continue;
        }
        model_parts.push(arg);
    }

    let model = if model_parts.is_empty() {
        None
    } else {
        Some(model_parts.join(" "))
    };

    (model, page_num)
}

/// Format a page of listings for display
pub fn format_listing_page(
    listings: &[Listing],
    page_num: usize,
) -> Result<(String, usize, usize), String> {
    let page = Page::new(listings, LISTINGS_PER_PAGE).goto(page_num)?;

    let mut table = Table::new(vec!["Model", "Price", "Posted", "Link"]).align(1, Align::Right);
    for listing in page.current_items() {
        table.add_row(vec![
            listing.model.clone(),
            format_currency(listing.price),
            listing.timestamp.clone().unwrap_or_default(),
            listing.url.clone().unwrap_or_default(),
        ]);
    }

    let mut rendered = table.render();
    if !page.is_last() {
        rendered.push_str(&format!("Run `listings {}` for more\n", page_num + 1));
    }

    Ok((rendered, page_num, page.total_pages()))
}

/// `listings [model] [page]`
pub async fn execute(ctx: &AppContext, args: &[&str]) -> Result<(), String> {
    let (model, page_num) = parse_listing_args(args);
    tracing::info!("📋 Listings requested (model: {:?}, page {})", model, page_num);

    let listings = ctx
        .client
        .fetch_listings(model.as_deref())
        .await
        .map_err(|e| e.to_string())?;

    if listings.is_empty() {
        println!("No listings found.");
        return Ok(());
    }

    let (rendered, page, total) = format_listing_page(&listings, page_num)?;
    print!("{}", rendered);
    println!("Page {}/{} ({} listings)", page, total, listings.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(i: usize) -> Listing {
        Listing {
            model: format!("RTX 30{}0", i % 10),
            price: 300.0 + i as f64,
            url: Some(format!("https://reddit.com/r/hardwareswap/{}", i)),
            timestamp: Some("2024-01-01T10:00:00".to_string()),
        }
    }

    #[test]
    fn test_parse_listing_args() {
        assert_eq!(parse_listing_args(&[]), (None, 1));
        assert_eq!(parse_listing_args(&["2"]), (None, 2));
        assert_eq!(
            parse_listing_args(&["RTX", "3080", "3"]),
            (Some("RTX 3080".to_string()), 3)
        );
    }

    #[test]
    fn test_format_listing_page() {
        let listings: Vec<Listing> = (0..12).map(listing).collect();
        let (rendered, page, total) = format_listing_page(&listings, 2).unwrap();
        assert_eq!((page, total), (2, 2));
        // header, separator, two rows
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("$311.00"));

        let (first, _, _) = format_listing_page(&listings, 1).unwrap();
        assert!(first.ends_with("Run `listings 2` for more\n"));
    }

    #[test]
    fn test_format_listing_page_out_of_range() {
        let listings: Vec<Listing> = (0..3).map(listing).collect();
        assert!(format_listing_page(&listings, 5).is_err());
    }
}
