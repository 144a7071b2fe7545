//! Order management commands.

use clap::Subcommand;

use neszi_client::ApiClient;
use neszi_client::types::Order;
use neszi_core::{OrderId, OrderStatus};

#[derive(Subcommand)]
pub enum OrdersAction {
    /// List all orders
    List,
    /// Move an order to a new status
    SetStatus {
        id: i64,
        /// One of: Pending, Packing, Shipped, "Out for Delivery", Delivered
        status: OrderStatus,
    },
}

pub async fn run(
    client: &ApiClient,
    action: OrdersAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrdersAction::List => {
            let orders = client.list_orders().await?;
            print_orders(&orders);
        }
        OrdersAction::SetStatus { id, status } => {
            client.update_order_status(OrderId::new(id), status).await?;
            println!("Order #{id} status updated to {status}");
        }
    }
    Ok(())
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    for order in orders {
        println!(
            "#{:<5} {:<24} {:<18} {:>10}  {} item(s)  {}",
            order.id,
            order.user_name,
            order.status,
            order.total_cost_cents.display(),
            order.total_items(),
            order.order_time.format("%Y-%m-%d %H:%M"),
        );
        println!(
            "       {} / {}  via {}{}",
            order.delivery_address.street,
            order.delivery_address.city,
            order.payment_method,
            order
                .mpesa_receipt_number
                .as_deref()
                .map_or_else(String::new, |receipt| format!("  receipt {receipt}")),
        );
    }
}
