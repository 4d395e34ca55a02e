use std::io::Write;

use anyhow::Result;
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::api::{BridgeClient, BridgeError, Quote};

const MAX_LISTED_CHAINS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    NoChains,
    QuoteReceived,
    QuoteFailed,
    Interrupted,
}

pub const GOODBYE: &str = "👋 Goodbye!";

/// Runs one list-chains, prompt, quote pass. Operator input is read from
/// `input` and everything meant for the operator goes to `out`.
pub async fn run<R, W>(client: &BridgeClient, mut input: R, out: &mut W) -> Result<SessionOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "🌉 Cross-Chain Bridge Tool")?;
    writeln!(out, "{}", "=".repeat(30))?;

    let chains = match client.list_chains().await {
        Ok(chains) => chains,
        Err(e) => {
            warn!("Failed to fetch chains: {:?}", e);
            writeln!(out, "Error getting chains: {}", e)?;
            Vec::new()
        }
    };
    if chains.is_empty() {
        writeln!(out, "❌ Could not fetch chains")?;
        return Ok(SessionOutcome::NoChains);
    }

    writeln!(out, "\nAvailable chains:")?;
    for (i, chain) in chains.iter().take(MAX_LISTED_CHAINS).enumerate() {
        writeln!(out, "{}. {} ({})", i + 1, chain.name, chain.key)?;
    }

    let Some(from_chain) = prompt(&mut input, out, "\nFrom chain (key)").await? else {
        return interrupted(out);
    };
    let Some(to_chain) = prompt(&mut input, out, "To chain (key)").await? else {
        return interrupted(out);
    };
    let Some(token) = prompt(&mut input, out, "Token symbol").await? else {
        return interrupted(out);
    };
    let token = token.to_uppercase();
    let Some(amount) = prompt(&mut input, out, "Amount").await? else {
        return interrupted(out);
    };

    writeln!(out, "\n🔍 Getting quote...")?;
    match client.get_quote(&from_chain, &to_chain, &token, &amount).await {
        Ok(quote) => {
            print_quote(&quote, out)?;
            Ok(SessionOutcome::QuoteReceived)
        }
        Err(e @ BridgeError::InvalidAmount(_)) => Err(e.into()),
        Err(e) => {
            warn!("Failed to get quote: {:?}", e);
            writeln!(out, "Error getting quote: {}", e)?;
            writeln!(out, "❌ Could not get quote")?;
            Ok(SessionOutcome::QuoteFailed)
        }
    }
}

/// Returns `None` once the input is exhausted.
async fn prompt<R, W>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}: ", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn interrupted<W: Write>(out: &mut W) -> Result<SessionOutcome> {
    writeln!(out, "\n{}", GOODBYE)?;
    Ok(SessionOutcome::Interrupted)
}

fn print_quote<W: Write>(quote: &Quote, out: &mut W) -> Result<()> {
    let gas = quote
        .gas_costs()
        .map_or_else(|| "N/A".to_string(), |costs| costs.to_string());
    writeln!(out, "✅ Quote received!")?;
    writeln!(out, "Estimated gas: {}", gas)?;
    writeln!(out, "Route found: {} steps", quote.step_count())?;

    if let Some(estimate) = &quote.estimate {
        info!(
            "Quote estimate. ToAmount={}. Duration={}s. Tool={}",
            detail(estimate.to_amount.as_ref()),
            detail(estimate.execution_duration.as_ref()),
            detail(quote.tool.as_ref()),
        );
    }
    Ok(())
}

fn detail(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "N/A".to_string(),
    }
}
