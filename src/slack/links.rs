use crate::error::{Result, SlackUtilsError};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Build a permalink to a message in the workspace's web client
///
/// The channel comes from `channel_id` when given and non-empty, otherwise from
/// the event's `channel` field. Format: `https://{workspace}.slack.com/archives/{channel}/p{ts}`
/// where `ts` has its dot removed.
pub fn build_message_link(
    event: &Value,
    workspace: &str,
    channel_id: Option<&str>,
) -> Result<String> {
    let channel = match channel_id.filter(|c| !c.is_empty()) {
        Some(channel) => channel,
        None => string_field(event, "channel")?,
    };
    let ts = string_field(event, "ts")?;

    Ok(format!(
        "https://{}.slack.com/archives/{}/p{}",
        workspace,
        channel,
        ts.replace('.', "")
    ))
}

/// Convert a Slack message timestamp (`seconds.micros`) into a UTC datetime
pub fn parse_message_ts(ts: &str) -> Result<DateTime<Utc>> {
    let invalid = || SlackUtilsError::InvalidTimestamp(ts.to_string());

    let (secs, micros) = ts.split_once('.').unwrap_or((ts, "0"));
    if micros.len() > 6 {
        return Err(invalid());
    }

    let secs: i64 = secs.parse().map_err(|_| invalid())?;
    let micros: u32 = format!("{:0<6}", micros).parse().map_err(|_| invalid())?;

    DateTime::from_timestamp(secs, micros * 1000).ok_or_else(invalid)
}

fn string_field<'a>(event: &'a Value, field: &str) -> Result<&'a str> {
    event
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| SlackUtilsError::MissingField(field.to_string()))
}
