//! Product detail page.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Select};
use emistore_commerce::detail::ProductDetail;
use emistore_commerce::selection::{CheckoutIntent, Selection};
use emistore_commerce::{PlanId, Slug, VariantId};
use emistore_data::CatalogService;
use serde::Serialize;

use super::ShowArgs;
use crate::context::Context;
use crate::output::{marker, stock_badge, strike};

#[derive(Serialize)]
struct ShowOutput<'a> {
    product: &'a ProductDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    checkout: Option<&'a CheckoutIntent>,
}

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let slug = Slug::new(args.slug);
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner(&format!("Loading {}...", slug));
    let result = catalog.get_product_by_slug(&slug).await;
    spinner.finish_and_clear();

    let mut selection = Selection::new();
    selection.load(result?);

    if let Some(variant) = args.variant {
        selection.select_variant(&VariantId::new(variant))?;
    }
    if let Some(plan) = args.plan {
        selection.select_plan(&PlanId::new(plan))?;
    }

    let mut buy = args.buy;
    if args.interactive && !ctx.output.is_json() {
        choose(&mut selection, ctx)?;
        if !buy {
            buy = Confirm::new()
                .with_prompt("Buy now?")
                .default(false)
                .interact()?;
        }
    }

    let detail = ProductDetail::from_selection(selection.loaded()?);
    let checkout = if buy { Some(selection.proceed()?) } else { None };

    if ctx.output.is_json() {
        ctx.output.json(&ShowOutput {
            product: &detail,
            checkout: checkout.as_ref(),
        });
        return Ok(());
    }

    print_detail(&detail, ctx);
    if let Some(intent) = checkout {
        ctx.output.line("");
        ctx.output.success(&intent.summary());
        ctx.output.kv("total payable", &intent.total_payable.to_string());
    }

    Ok(())
}

/// Interactive variant and plan pickers, preselecting the current choice.
fn choose(selection: &mut Selection, ctx: &Context) -> Result<()> {
    let detail = ProductDetail::from_selection(selection.loaded()?);

    let labels: Vec<String> = detail
        .variants
        .iter()
        .map(|v| format!("{}  {}  {}", v.name, v.price, stock_badge(v.in_stock)))
        .collect();
    let current = detail.variants.iter().position(|v| v.selected).unwrap_or(0);
    let index = Select::new()
        .with_prompt("Choose a variant")
        .items(&labels)
        .default(current)
        .interact()?;
    let variant = &detail.variants[index];
    selection.select_variant(&variant.id)?;

    let labels: Vec<String> = detail
        .plans
        .iter()
        .map(|p| format!("{}  {}", p.pricing.headline(), p.pricing.interest_label))
        .collect();
    let current = detail.plans.iter().position(|p| p.selected).unwrap_or(0);
    let index = Select::new()
        .with_prompt("Choose an EMI plan")
        .items(&labels)
        .default(current)
        .interact()?;
    let plan = &detail.plans[index];
    selection.select_plan(&plan.id)?;

    ctx.output
        .debug(&format!("Selected variant {} with plan {}", variant.id, plan.id));
    Ok(())
}

fn print_detail(detail: &ProductDetail, ctx: &Context) {
    ctx.output.header(&detail.name);
    ctx.output.kv("brand", &detail.brand);
    ctx.output.kv(
        "rating",
        &format!("{:.1} ({} reviews)", detail.rating, detail.review_count),
    );
    ctx.output.kv("image", &detail.image);
    if !detail.description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&detail.description);
    }

    if !detail.specifications.is_empty() {
        ctx.output.line("");
        ctx.output.line(&style("Specifications").bold().to_string());
        for (key, value) in &detail.specifications {
            ctx.output.kv(key, value);
        }
    }

    ctx.output.line("");
    ctx.output.line(&style("Variants").bold().to_string());
    for variant in &detail.variants {
        let mut line = format!("{} {}  {}", marker(variant.selected), variant.name, variant.price);
        if variant.discount_percent > 0 {
            line.push_str(&format!(
                "  {} {}",
                strike(&variant.original_price.to_string()),
                style(format!("{}% off", variant.discount_percent)).green()
            ));
        }
        line.push_str(&format!("  {}", stock_badge(variant.in_stock)));
        ctx.output.line(&format!("  {}", line));
        ctx.output.debug(&format!("variant id {}", variant.id));
    }

    ctx.output.line("");
    ctx.output.line(&style("EMI plans").bold().to_string());
    for plan in &detail.plans {
        let pricing = &plan.pricing;
        let mut line = format!(
            "{} {}  {}  total {}",
            marker(plan.selected),
            pricing.headline(),
            pricing.interest_label,
            pricing.total_payable
        );
        if pricing.no_cost {
            line.push_str(&format!("  {}", style("No Cost EMI").green()));
        }
        if let Some(cashback) = pricing.cashback {
            line.push_str(&format!("  cashback {}", cashback));
        }
        if let Some(fee) = pricing.processing_fee {
            line.push_str(&format!("  processing fee {}", fee));
        }
        ctx.output.line(&format!("  {}", line));
        ctx.output.debug(&format!("plan id {}", plan.id));
    }
}
