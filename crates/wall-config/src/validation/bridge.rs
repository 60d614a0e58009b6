//! Bridge validation: origin URL, names, monitor path.

use url::Url;

use crate::schema::WallConfig;

use super::helpers::validate_non_empty;

pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &WallConfig) {
    let bridge = &config.bridge;

    match Url::parse(&bridge.origin) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            if url.path() != "/" || url.query().is_some() {
                errors.push(format!(
                    "bridge.origin = {:?} must not carry a path or query",
                    bridge.origin
                ));
            }
        }
        Ok(url) => errors.push(format!(
            "bridge.origin scheme {:?} is not http or https",
            url.scheme()
        )),
        Err(e) => errors.push(format!("bridge.origin = {:?} is invalid: {e}", bridge.origin)),
    }

    validate_non_empty(errors, "bridge.channel_name", &bridge.channel_name);
    validate_non_empty(errors, "bridge.window_name", &bridge.window_name);

    if !bridge.monitor_path.starts_with('/') {
        errors.push(format!(
            "bridge.monitor_path = {:?} must start with '/'",
            bridge.monitor_path
        ));
    }
}
