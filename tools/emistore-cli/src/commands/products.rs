//! Product listing.

use anyhow::{bail, Result};
use console::style;
use emistore_commerce::listing::{product_cards, CategoryFilter, ProductCard};
use emistore_commerce::view::PageState;
use emistore_data::CatalogService;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::strike;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let filter = if args.all {
        CategoryFilter::All
    } else {
        let category = args
            .category
            .as_deref()
            .unwrap_or(&ctx.config.display.default_category);
        CategoryFilter::from_value(category)
    };

    let mut query = filter.to_query();
    if let Some(brand) = args.brand {
        query = query.with_brand(brand);
    }
    if let Some(limit) = args.limit {
        query = query.with_limit(limit);
    }

    let catalog = ctx.catalog()?;
    let spinner = ctx.output.spinner("Loading products...");
    let page = PageState::from_result(catalog.list_products(&query).await);
    spinner.finish_and_clear();

    let products = match page {
        PageState::Ready(products) => products,
        PageState::Failed(message) => bail!(message),
        PageState::Loading => bail!("Product listing did not complete"),
    };
    let cards = product_cards(&products, ctx.config.display.swatch_preview)?;

    if ctx.output.is_json() {
        ctx.output.json(&cards);
        return Ok(());
    }

    ctx.output.header(filter.label());
    if cards.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }

    for card in &cards {
        print_card(card, ctx);
    }
    ctx.output.line("");
    ctx.output.info(&format!(
        "{} product(s). Run `emistore show <slug>` for details.",
        cards.len()
    ));

    Ok(())
}

fn print_card(card: &ProductCard, ctx: &Context) {
    ctx.output.line("");
    ctx.output.line(&format!(
        "{}  {}",
        style(&card.name).bold(),
        style(&card.brand).dim()
    ));

    let mut price = card.price.to_string();
    if card.original_price > card.price {
        price.push_str(&format!("  {}", strike(&card.original_price.to_string())));
    }
    ctx.output.kv("price", &price);

    let mut colours: Vec<&str> = card.swatches.iter().map(|s| s.color.as_str()).collect();
    let more = card.more_label();
    if let Some(more) = more.as_deref() {
        colours.push(more);
    }
    ctx.output.kv("colours", &colours.join(", "));

    ctx.output.kv(
        "emi",
        &format!(
            "{} ({} options)",
            style(card.emi_teaser()).green(),
            card.emi_option_count
        ),
    );
    ctx.output.kv(
        "rating",
        &format!("{} {:.1} ({} reviews)", card.stars(), card.rating, card.review_count),
    );
    ctx.output.kv("slug", card.slug.as_str());
}
