//! Keymetal demo runner.
//!
//! Replays the canonical calculations (addition, subtraction, multiplication,
//! division and sum) and logs each result.
//!
//! Usage: cargo run --bin keymetal [scenario]
//!
//! Each scenario has its own exchange rate. Set `KEYMETAL_CALCULATOR__EXCHANGE`
//! to run all of them at one rate instead.

use std::str::FromStr;

use anyhow::Context;
use keymetal_core::{Calculator, Currency};
use keymetal_shared::{AppConfig, AppError, AppResult, CalculatorConfig};
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One of the canonical calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Sum,
}

impl Scenario {
    const ALL: [Self; 5] = [
        Self::Addition,
        Self::Subtraction,
        Self::Multiplication,
        Self::Division,
        Self::Sum,
    ];

    const fn name(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::Sum => "sum",
        }
    }

    fn default_exchange(self) -> Decimal {
        match self {
            Self::Addition | Self::Sum => Decimal::from(55),
            Self::Subtraction => Decimal::new(6688, 2),
            Self::Multiplication | Self::Division => Decimal::new(6266, 2),
        }
    }

    fn run(self, config: &CalculatorConfig) -> AppResult<String> {
        let calculator = Calculator::from_config(config)?;
        let exchange = calculator.exchange();

        let result = match self {
            Self::Addition => {
                let first = Currency::new(0, Decimal::new(2344, 2));
                let second = Currency::new(0, Decimal::new(3155, 2));
                calculator.add(&first, &second)?
            }
            Self::Subtraction => {
                let first = Currency::new(5, Decimal::new(2388, 2));
                let second = Currency::new(2, Decimal::new(4733, 2));
                calculator.subtract(&first, &second)?
            }
            Self::Multiplication => {
                let currency = Currency::new(4, Decimal::new(1088, 2));
                calculator.multiply(&currency, Decimal::from(3))?
            }
            Self::Division => {
                let currency = Currency::new(4, Decimal::new(1088, 2));
                calculator.divide(&currency, Decimal::from(2))?
            }
            Self::Sum => {
                let currencies = [
                    Currency::from_keys(Decimal::new(115, 2), exchange)?,
                    Currency::from_refined(Decimal::new(4266, 2), exchange)?,
                    Currency::from_keys(Decimal::new(474, 2), exchange)?,
                ];
                let total = calculator.sum(&currencies)?;
                return Ok(format!("{} keys", total.to_keys(exchange)?));
            }
        };

        Ok(result.to_string())
    }
}

impl FromStr for Scenario {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::Validation(format!("Unknown scenario: {s}")))
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let scenarios = match std::env::args().nth(1) {
        Some(name) => vec![name.parse::<Scenario>()?],
        None => Scenario::ALL.to_vec(),
    };

    for scenario in scenarios {
        let calculator_config = if config.calculator.exchange.is_zero() {
            CalculatorConfig {
                exchange: scenario.default_exchange(),
            }
        } else {
            config.calculator.clone()
        };
        let exchange = calculator_config.exchange;

        match scenario.run(&calculator_config) {
            Ok(result) => info!(
                scenario = scenario.name(),
                exchange = %exchange,
                %result,
                "Calculated"
            ),
            Err(err) => error!(
                scenario = scenario.name(),
                exchange = %exchange,
                code = err.error_code(),
                error = %err,
                "Calculation failed"
            ),
        }
    }

    Ok(())
}
