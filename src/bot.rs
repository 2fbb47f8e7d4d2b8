//! The polling bot: snapshot reserves, build a market, evaluate, report.
//!
//! Each round stands alone. Reserves are snapshotted, dust pairs dropped,
//! the graph rebuilt from scratch and every configured source evaluated
//! against it, so a round can never observe a half-updated market.

use alloy::network::Ethereum;
use alloy::providers::RootProvider;
use eyre::Result;
use log::{debug, error, info, warn};

use crate::arb::error::ArbError;
use crate::arb::evaluate::{Evaluator, Opportunity, Outcome};
use crate::arb::market::MarketGraph;
use crate::arb::numeric::{self, FeeRate};
use crate::config::Config;
use crate::feed::pairs::{self, PairEntry};
use crate::feed::reserves;
use crate::notify::SlackNotifier;
use crate::utils::providers::create_http_provider;

/// The polling arbitrage bot.
pub struct Bot {
    /// Runtime configuration the bot was started with.
    config: Config,
    /// Parsed pair list, loaded once at startup.
    entries: Vec<PairEntry>,
    /// Loop sizing pipeline.
    evaluator: Evaluator,
    /// RPC provider; absent in offline mode.
    provider: Option<RootProvider<Ethereum>>,
    /// Opportunity notifier; absent when no token is configured.
    notifier: Option<SlackNotifier>,
}

impl Bot {
    /// Builds a bot: loads the pair list and connects the provider unless
    /// the configuration asks for offline evaluation.
    ///
    /// # Errors
    /// * If the pair list cannot be loaded
    /// * If the fee or RPC URL configuration is unusable
    pub fn new(config: Config) -> Result<Self> {
        let entries = pairs::load_pairs(&config.pairs_file)?;
        info!(
            "Loaded {} pairs from {}",
            entries.len(),
            config.pairs_file.display()
        );

        let fee = FeeRate::from_bps(config.fee_bps)?;
        let evaluator = Evaluator::new(fee, config.volume_mode);

        let provider = if config.offline {
            info!("Offline mode: evaluating pinned reserves");
            None
        } else {
            Some(create_http_provider(&config)?)
        };

        let notifier = match SlackNotifier::new() {
            Ok(notifier) => Some(notifier),
            Err(error) => {
                debug!("Notifications disabled: {error}");
                None
            }
        };

        Ok(Self {
            config,
            entries,
            evaluator,
            provider,
            notifier,
        })
    }

    /// Runs a single evaluation round and returns what it found.
    ///
    /// # Errors
    /// * If the round hits an internal invariant failure in the core
    pub async fn scan(&self) -> Result<Vec<(String, Opportunity)>> {
        self.run_round(1).await
    }

    /// Runs rounds on the configured interval until the configured count
    /// is spent. A failed round is logged and the next one still runs.
    ///
    /// # Errors
    /// Infallible in practice; kept fallible to match the entry points.
    pub async fn watch(&self) -> Result<()> {
        let mut ticker = tokio::time::interval(self.config.interval);
        for round in 1..=self.config.rounds {
            ticker.tick().await;
            info!("Search: {round}");
            if let Err(round_error) = self.run_round(round).await {
                error!("Round {round} failed: {round_error}");
            }
        }
        Ok(())
    }

    /// One full round: snapshot reserves, build the market, evaluate every
    /// configured source, report what was found.
    async fn run_round(&self, round: u32) -> Result<Vec<(String, Opportunity)>> {
        let snapshots = if let Some(provider) = &self.provider {
            reserves::collect_snapshots(provider, &self.entries).await
        } else {
            reserves::embedded_snapshots(&self.entries)
        };
        let pools = reserves::pools_from_snapshots(&snapshots, self.config.min_reserve);

        let mut market = MarketGraph::with_policy(self.config.edge_policy);
        for pool in &pools {
            market.add_pool(pool);
        }
        info!(
            "Round {round}: {} quotes kept, market of {} assets and {} edges",
            pools.len(),
            market.node_count(),
            market.edge_count()
        );

        let mut found = Vec::new();
        for source in &self.config.sources {
            match self.evaluator.evaluate(&market, source) {
                Ok(Outcome::Opportunity(opportunity)) => {
                    info!("{}", describe(source, &opportunity));
                    found.push((source.clone(), opportunity));
                }
                Ok(Outcome::NoOpportunity) => debug!("No opportunity from {source}"),
                Err(ArbError::UnknownSourceAsset(symbol)) => {
                    warn!("Source {symbol} is not in this round's market");
                }
                Err(core_error) => return Err(core_error.into()),
            }
        }

        self.notify(&found).await;
        Ok(found)
    }

    /// Posts the round's opportunities, when a notifier is configured.
    async fn notify(&self, found: &[(String, Opportunity)]) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        if found.is_empty() {
            return;
        }
        let message = found
            .iter()
            .map(|(source, opportunity)| describe(source, opportunity))
            .collect::<Vec<_>>()
            .join("\n");
        if let Err(send_error) = notifier.send(&message).await {
            warn!("Slack notification failed: {send_error}");
        }
    }
}

/// One-line report of an opportunity, in the starting asset's wei.
fn describe(source: &str, opportunity: &Opportunity) -> String {
    let hops = opportunity.path.join(" -> ");
    let return_pct = (numeric::approx_f64(&opportunity.expected_return) - 1.0) * 100.0;
    format!(
        "{source}: loop {hops}, in {} wei, profit {} wei, expected return {return_pct:.2}%",
        opportunity.amount_in, opportunity.profit
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::arb::evaluate::VolumeMode;
    use crate::arb::market::EdgePolicy;
    use alloy::primitives::U256;
    use num_bigint::BigInt;
    use num_rational::BigRational;
    use std::time::Duration;

    /// The demo triangle: WBNB is 10% cheaper bought via USDT than it sells
    /// for in BUSD.
    const PAIRS: &str = r#"[
        {
            "pair": "0x0000000000000000000000000000000000000011",
            "token0": { "symbol": "WBNB", "address": "0x0000000000000000000000000000000000000001" },
            "token1": { "symbol": "BUSD", "address": "0x0000000000000000000000000000000000000002" },
            "reserve0": "100000000000000000000",
            "reserve1": "60000000000000000000000"
        },
        {
            "pair": "0x0000000000000000000000000000000000000012",
            "token0": { "symbol": "USDT", "address": "0x0000000000000000000000000000000000000003" },
            "token1": { "symbol": "BUSD", "address": "0x0000000000000000000000000000000000000002" },
            "reserve0": "50000000000000000000000",
            "reserve1": "50000000000000000000000"
        },
        {
            "pair": "0x0000000000000000000000000000000000000013",
            "token0": { "symbol": "USDT", "address": "0x0000000000000000000000000000000000000003" },
            "token1": { "symbol": "WBNB", "address": "0x0000000000000000000000000000000000000001" },
            "reserve0": "30000000000000000000000",
            "reserve1": "55000000000000000000"
        }
    ]"#;

    #[tokio::test]
    async fn test_offline_scan_finds_the_mispriced_loop() {
        let path = std::env::temp_dir().join(format!(
            "gyre-offline-scan-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, PAIRS).unwrap();

        let config = Config {
            rpc_url: String::new(),
            pairs_file: path.clone(),
            sources: vec!["WBNB".to_string()],
            interval: Duration::from_secs(1),
            rounds: 1,
            min_reserve: reserves::MIN_RESERVE,
            fee_bps: 250,
            edge_policy: EdgePolicy::Asymmetric,
            volume_mode: VolumeMode::Exact,
            offline: true,
        };
        let found = Bot::new(config).unwrap().scan().await.unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(found.len(), 1);
        let (source, opportunity) = &found[0];
        assert_eq!(source, "WBNB");
        assert_eq!(opportunity.path, ["WBNB", "BUSD", "USDT", "WBNB"]);
        assert_eq!(
            opportunity.expected_return,
            BigRational::new(BigInt::from(11), BigInt::from(10))
        );

        // About 0.245 WBNB in for about 0.0024 WBNB profit; the sqrt step
        // is floating point, so pin magnitudes rather than exact wei.
        let wei = |value: u64| U256::from(value);
        assert!(opportunity.amount_in > wei(200_000_000_000_000_000));
        assert!(opportunity.amount_in < wei(300_000_000_000_000_000));
        assert!(opportunity.profit > wei(1_000_000_000_000_000));
        assert!(opportunity.profit < wei(10_000_000_000_000_000));
    }

    #[test]
    fn test_describe_formats_the_reference_loop() {
        let opportunity = Opportunity {
            amount_in: U256::from(7),
            profit: U256::from(4),
            path: vec!["A".into(), "B".into(), "C".into(), "A".into()],
            expected_return: BigRational::new(BigInt::from(27), BigInt::from(10)),
        };
        assert_eq!(
            describe("A", &opportunity),
            "A: loop A -> B -> C -> A, in 7 wei, profit 4 wei, expected return 170.00%"
        );
    }
}
