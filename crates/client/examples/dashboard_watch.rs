//! Watch the live dashboard topics and print every update.
//!
//! Point `STOCKLINK_STREAM_URL` at a running server and run:
//! `cargo run -p stocklink-client --example dashboard_watch`

use anyhow::Result;
use stocklink_client::{logging, StreamClient};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let client = StreamClient::new()?;
    let warehouses = client.watch_warehouses(true, 0);
    let movements = client.watch_movements(10);
    let alert_count = client.watch_alert_count();

    let mut warehouse_rx = warehouses.watch();
    let mut movement_rx = movements.watch();
    let mut alert_rx = alert_count.watch();

    loop {
        tokio::select! {
            changed = warehouse_rx.changed() => {
                changed?;
                let state = warehouse_rx.borrow_and_update();
                if let Some(message) = &state.error {
                    eprintln!("warehouses: {message}");
                } else {
                    for w in &state.data {
                        println!(
                            "warehouse {:20} stock {:6} utilization {:5.1}%",
                            w.name, w.total_stock, w.utilization
                        );
                    }
                }
            }
            changed = movement_rx.changed() => {
                changed?;
                let state = movement_rx.borrow_and_update();
                if let Some(m) = state.data.first() {
                    let kind = m.movement_type.map(|t| t.as_str()).unwrap_or("?");
                    println!("latest movement: {kind} x{} ({})", m.quantity, m.uuid);
                }
            }
            changed = alert_rx.changed() => {
                changed?;
                let state = alert_rx.borrow_and_update();
                println!("active stock alerts: {}", state.data);
            }
        }
    }
}
