use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.api_url.as_deref() {
        let parsed = reqwest::Url::parse(raw.trim())
            .map_err(|e| format!("invalid --api-url '{raw}': {e}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(format!("invalid --api-url '{raw}', expected http or https"));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
        if timeout > 3600 {
            return Err("invalid timeout".to_string());
        }
    }
    if let Some(raw) = args.header.as_deref() {
        if raw.split_once(':').is_none() {
            return Err(format!("invalid --header '{raw}', expected 'Key: Value'"));
        }
    }
    if let Some(raw) = args.proxy.as_deref() {
        reqwest::Url::parse(raw.trim()).map_err(|e| format!("invalid --proxy '{raw}': {e}"))?;
    }
    Ok(())
}
