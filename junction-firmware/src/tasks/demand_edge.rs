//! Demand-edge interrupt task
//!
//! The expander's mirrored INT line falls when any sensor input changes.
//! The control loop reads the ports on its next pass, which also clears
//! the expander interrupt.

use embassy_rp::gpio::Input;

use crate::channels::DEMAND_EDGE;

#[embassy_executor::task]
pub async fn demand_edge_task(mut int: Input<'static>) {
    loop {
        int.wait_for_falling_edge().await;
        DEMAND_EDGE.signal(());
    }
}
