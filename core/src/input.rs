use crate::error::{Error, Result};
use crate::model::metrics::MetricInputs;

/// Field keys accepted in `key:value` tokens.
pub const INPUT_KEYS: &[&str] = &["planned", "downtime", "cycle", "total", "good"];

#[derive(Debug, PartialEq, Default)]
pub struct ParsedInput {
    /// Tokens without a `key:` prefix.
    pub words: Vec<String>,
    /// `key:value` pairs in the order given.
    pub metadata: Vec<(String, String)>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                parsed.metadata.push((key.to_string(), value.to_string()));
                continue;
            }
        }
        parsed.words.push(arg.clone());
    }

    parsed
}

/// Splits a free-form input line on whitespace and parses it.
pub fn parse_line(line: &str) -> ParsedInput {
    let args: Vec<String> = line.split_whitespace().map(|s| s.to_string()).collect();
    parse_args(&args)
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    let key = key.to_lowercase();

    // 1. Exact match
    if candidates.contains(&key.as_str()) {
        return Ok(key);
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key.as_str()))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(Error::UnknownKey(key)),
        _ => Err(Error::AmbiguousKey {
            key,
            candidates: matches.iter().map(|m| m.to_string()).collect(),
        }),
    }
}

/// Applies parsed `key:value` pairs on top of `base`.
///
/// Either every token is understood and the updated inputs are returned,
/// or the first offending token is reported and `base` is left as is.
pub fn apply_inputs(base: &MetricInputs, parsed: &ParsedInput) -> Result<MetricInputs> {
    if let Some(word) = parsed.words.first() {
        return Err(Error::Malformed(word.clone()));
    }

    let mut inputs = *base;
    for (key, value) in &parsed.metadata {
        let full_key = expand_key(key, INPUT_KEYS)?;
        match full_key.as_str() {
            "planned" => inputs.planned_production_time = parse_number(&full_key, value)?,
            "downtime" => inputs.downtime = parse_number(&full_key, value)?,
            "cycle" => inputs.ideal_cycle_time = parse_number(&full_key, value)?,
            "total" => inputs.total_units = parse_number(&full_key, value)?,
            "good" => inputs.good_units = parse_number(&full_key, value)?,
            _ => return Err(Error::UnknownKey(full_key)),
        }
    }
    Ok(inputs)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Renders inputs back into the `key:value` form accepted by [`parse_line`].
pub fn format_inputs(inputs: &MetricInputs) -> String {
    format!(
        "planned:{} downtime:{} cycle:{} total:{} good:{}",
        inputs.planned_production_time,
        inputs.downtime,
        inputs.ideal_cycle_time,
        inputs.total_units,
        inputs.good_units
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let args = vec![
            "planned:480".to_string(),
            "down:60".to_string(),
            "stray".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.words, vec!["stray".to_string()]);
        assert_eq!(
            parsed.metadata,
            vec![
                ("planned".to_string(), "480".to_string()),
                ("down".to_string(), "60".to_string()),
            ]
        );
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("p", INPUT_KEYS).unwrap(), "planned");
        assert_eq!(expand_key("d", INPUT_KEYS).unwrap(), "downtime");
        assert_eq!(expand_key("Cyc", INPUT_KEYS).unwrap(), "cycle");
        assert_eq!(expand_key("total", INPUT_KEYS).unwrap(), "total");

        // Ambiguous
        let candidates = ["good", "goal"];
        assert!(matches!(
            expand_key("go", &candidates),
            Err(Error::AmbiguousKey { .. })
        ));

        // Unknown
        assert!(matches!(expand_key("x", INPUT_KEYS), Err(Error::UnknownKey(_))));
    }

    #[test]
    fn test_apply_inputs() {
        let base = MetricInputs::default();
        let parsed = parse_line("p:600 d:30 c:0.25 t:1000 g:990");
        let inputs = apply_inputs(&base, &parsed).unwrap();

        assert_eq!(inputs.planned_production_time, 600.0);
        assert_eq!(inputs.downtime, 30.0);
        assert_eq!(inputs.ideal_cycle_time, 0.25);
        assert_eq!(inputs.total_units, 1000);
        assert_eq!(inputs.good_units, 990);
    }

    #[test]
    fn test_apply_inputs_partial_update() {
        let base = MetricInputs::default();
        let inputs = apply_inputs(&base, &parse_line("downtime:0")).unwrap();

        assert_eq!(inputs.downtime, 0.0);
        assert_eq!(inputs.planned_production_time, base.planned_production_time);
        assert_eq!(inputs.good_units, base.good_units);
    }

    #[test]
    fn test_apply_inputs_rejects_bad_tokens() {
        let base = MetricInputs::default();

        assert!(matches!(
            apply_inputs(&base, &parse_line("total:-5")),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            apply_inputs(&base, &parse_line("planned:abc")),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            apply_inputs(&base, &parse_line("480")),
            Err(Error::Malformed(_))
        ));
        assert!(matches!(
            apply_inputs(&base, &parse_line("speed:3")),
            Err(Error::UnknownKey(_))
        ));
    }

    #[test]
    fn test_format_inputs_parses_back() {
        let base = MetricInputs {
            planned_production_time: 450.5,
            downtime: 12.0,
            ideal_cycle_time: 0.75,
            total_units: 321,
            good_units: 300,
        };
        let line = format_inputs(&base);
        let parsed = apply_inputs(&MetricInputs::default(), &parse_line(&line)).unwrap();
        assert_eq!(parsed, base);
    }
}
