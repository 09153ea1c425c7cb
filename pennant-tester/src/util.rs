use anyhow::{Result, bail};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse seed tokens, accepting decimal or `0x`-prefixed hex. Duplicates
/// are dropped and an empty list falls back to a single default seed.
pub fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds: Vec<u64> = Vec::new();
    for token in tokens {
        let parsed = if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            u64::from_str_radix(hex, 16).ok()
        } else if let Ok(value) = token.parse::<i64>() {
            Some(value.unsigned_abs())
        } else {
            token.parse::<u64>().ok()
        };
        let Some(seed) = parsed else {
            bail!("Unrecognized seed token: {token}");
        };
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    if seeds.is_empty() {
        seeds.push(1337);
    }
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_filters() {
        let parts = split_csv(" alpha, ,beta,  gamma ");
        assert_eq!(parts, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn resolves_decimal_hex_and_negative_seeds() {
        let tokens = split_csv("42,-7,0xff,42");
        assert_eq!(resolve_seeds(&tokens).unwrap(), vec![42, 7, 255]);
    }

    #[test]
    fn empty_input_uses_default_seed() {
        assert_eq!(resolve_seeds(&[]).unwrap(), vec![1337]);
    }

    #[test]
    fn rejects_garbage() {
        let err = resolve_seeds(&["CL-ORANGE42".to_string()]).unwrap_err();
        assert!(err.to_string().contains("CL-ORANGE42"));
    }
}
