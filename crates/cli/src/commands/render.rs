//! Plain-text rendering of API resources.

use chrono::{DateTime, Utc};
use vibe_commerce_core::{
    Cart, Order, OrderLine, OrderSummary, Page, PricingBreakdown, Product, Receipt,
};

/// A page of products, one per line, with the page position.
pub fn product_page(page: &Page<Product>) -> String {
    if page.is_empty() {
        return "No products found matching your filters".to_string();
    }

    let mut lines: Vec<String> = page
        .items
        .iter()
        .map(|p| {
            format!(
                "{:>5}  {:<32}  {:>10}  {:<14}  {}",
                p.product_id,
                p.name,
                p.price.to_string(),
                p.category,
                p.stock_label()
            )
        })
        .collect();
    lines.push(page_footer(page));
    lines.join("\n")
}

/// A single product.
pub fn product(product: &Product) -> String {
    let mut lines = vec![
        format!("{} (#{})", product.name, product.product_id),
        format!("Price:    {}", product.price),
        format!("Category: {}", product.category),
        format!("Stock:    {}", product.stock_label()),
    ];
    if !product.description.is_empty() {
        lines.push(String::new());
        lines.push(product.description.clone());
    }
    lines.join("\n")
}

/// The cart with display totals.
pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "{:>5}  {:<32}  {:>10} x {:<3}  {:>10}",
                item.product_id,
                item.name,
                item.price.to_string(),
                item.quantity,
                item.line_total().to_string()
            )
        })
        .collect();
    lines.push(String::new());
    lines.extend(pricing(&cart.pricing()));
    lines.join("\n")
}

/// A placed order's confirmation.
pub fn receipt(receipt: &Receipt) -> String {
    let mut lines = vec![
        "Order Confirmed!".to_string(),
        format!("Order Number: {}", receipt.order_id),
    ];
    if let Some(at) = receipt.created_at {
        lines.push(format!("Order Date:   {}", date_time(at)));
    }
    if let Some(customer) = &receipt.customer {
        lines.push(format!("Customer:     {} <{}>", customer.name, customer.email));
    }
    lines.push(String::new());
    lines.extend(receipt.items.iter().map(order_line));
    lines.push(String::new());
    lines.extend(pricing(&receipt.pricing));
    lines.push(format!("Status:   {}", receipt.status));
    lines.join("\n")
}

/// A page of order history.
pub fn order_page(page: &Page<OrderSummary>) -> String {
    if page.is_empty() {
        return "No orders yet".to_string();
    }

    let mut lines: Vec<String> = page
        .items
        .iter()
        .map(|order| {
            format!(
                "{:<24}  {:<18}  {:>3} items  {:>10}  {}",
                order.order_id,
                order.created_at.map(date_time).unwrap_or_default(),
                order.total_items,
                order.total_amount.to_string(),
                order.status
            )
        })
        .collect();
    lines.push(page_footer(page));
    lines.join("\n")
}

/// A single order.
pub fn order(order: &Order) -> String {
    let mut lines = vec![format!("Order {}", order.order_id)];
    if let Some(at) = order.created_at {
        lines.push(format!("Placed {}", date_time(at)));
    }
    lines.push(String::new());
    lines.extend(order.items.iter().map(order_line));
    lines.push(String::new());
    lines.extend(pricing(&order.pricing));
    lines.push(format!("Status:   {}", order.status));
    lines.join("\n")
}

fn order_line(line: &OrderLine) -> String {
    format!(
        "{:<32}  {:>10} x {:<3}  {:>10}",
        line.name,
        line.price.to_string(),
        line.quantity,
        line.line_total().to_string()
    )
}

fn pricing(pricing: &PricingBreakdown) -> Vec<String> {
    let shipping = if pricing.free_shipping() {
        "Free".to_string()
    } else {
        pricing.shipping.to_string()
    };
    vec![
        format!("Subtotal: {}", pricing.subtotal),
        format!("Tax:      {}", pricing.tax),
        format!("Shipping: {shipping}"),
        format!("Total:    {}", pricing.total),
    ]
}

fn page_footer<T>(page: &Page<T>) -> String {
    format!("Page {} of {}", page.page, page.total_pages)
}

fn date_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
