/*!
 * # Gyre - Cyclic Arbitrage Detection
 *
 * Gyre watches constant-product pools, folds their quotes into a price
 * graph and finds loops of trades that return more of an asset than they
 * consume. Detection runs on log-domain weights; everything that decides
 * money runs on exact rational arithmetic.
 *
 * ## Core Features
 *
 * - **Loop Detection**: Bellman-Ford negative-cycle search over pool quotes
 * - **Exact Sizing**: closed-form optimal input on arbitrary-precision rationals
 * - **Round Polling**: periodic reserve snapshots, each evaluated in isolation
 * - **Notifications**: optional Slack reports when a round finds a loop
 *
 * ## Module Structure
 *
 * - `arb`: Core arbitrage detection and sizing logic
 * - `bot`: The polling round loop
 * - `config`: Configuration management for the system
 * - `feed`: Pair list and reserve snapshots
 * - `notify`: Outbound notifications
 * - `utils`: Utility functions and helpers
 */

/// Arbitrage detection and sizing logic
pub mod arb;
/// The polling round loop
pub mod bot;
/// Configuration management for the system
pub mod config;
/// Pair list and reserve snapshots
pub mod feed;
/// Outbound notifications
pub mod notify;
/// Utility functions and helpers
pub mod utils;
