use std::collections::BTreeSet;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub const CODE_VERIFIER_LENGTH: usize = 128;
pub const STATE_LENGTH: usize = 16;

/// Listings hold at most this many items.
pub const MAX_RANK: usize = 50;

/// Random string over `A-Z`, `a-z` and `0-9`.
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    generate_random_string(CODE_VERIFIER_LENGTH)
}

pub fn generate_state() -> String {
    generate_random_string(STATE_LENGTH)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Sorted, de-duplicated 1-based ranks of listed items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranks(pub Vec<usize>);

/// Parses a comma separated list of 1-based ranks such as `1,3,5-7`.
pub fn parse_ranks(input: &str) -> Result<Ranks, String> {
    let mut ranks = BTreeSet::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_rank(start)?;
                let end = parse_rank(end)?;
                if start > end {
                    return Err(format!("Invalid range '{}'", part));
                }
                ranks.extend(start..=end);
            }
            None => {
                ranks.insert(parse_rank(part)?);
            }
        }
    }

    if ranks.is_empty() {
        return Err("No ranks given".to_string());
    }

    Ok(Ranks(ranks.into_iter().collect()))
}

fn parse_rank(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("Ranks start at 1".to_string()),
        Ok(rank) if rank > MAX_RANK => Err(format!("Ranks go up to {}", MAX_RANK)),
        Ok(rank) => Ok(rank),
        Err(_) => Err(format!("Invalid rank '{}'", value.trim())),
    }
}

/// Joins names for table cells, `-` when there is nothing to show.
pub fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
