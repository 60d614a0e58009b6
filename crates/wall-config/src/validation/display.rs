use crate::schema::WallConfig;

use super::helpers::validate_non_empty;

pub(crate) fn validate_display(errors: &mut Vec<String>, config: &WallConfig) {
    let key = &config.display.state_key;
    validate_non_empty(errors, "display.state_key", key);
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        errors.push(format!(
            "display.state_key = {key:?} may only contain letters, digits, '-' and '_'"
        ));
    }
}
