//! Default TOML config template.

pub(crate) fn default_config_toml() -> String {
    r##"# Wall Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[display]
# default_mode = "triple"   # single | triple | quad | grid
# persist = true            # restore the wall on next start
# state_key = "wall"

[bridge]
# origin = "http://localhost:5173"
# channel_name = "monitor_sync"
# window_name = "MonitorWindow"
# window_features = "width=1280,height=800"
# monitor_path = "/monitor"

[layout]
# gap = 8                   # 0-40
# outer_padding = 10        # 0-80

[logging]
# level = "info"            # trace | debug | info | warn | error
"##
    .to_string()
}
