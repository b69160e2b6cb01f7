/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `dockbar init` to create a starter configuration file.
pub fn generate_config() -> String {
    "# dockbar configuration\n\
# Location: ~/.config/dockbar/config.toml\n\
\n\
[bar]\n\
# Screen edge to dock to: \"top\", \"bottom\", \"left\", or \"right\".\n\
edge = \"bottom\"\n\
# \"docked\" reserves the edge, \"autohide\" slides away until the pointer\n\
# reaches it, \"floating\" does neither.\n\
mode = \"docked\"\n\
# Thickness in DPI-independent pixels (8-400).\n\
thickness = 40.0\n\
# Always touch the physical screen edge, even if other bars share it.\n\
requires_screen_edge = false\n\
# Blur the desktop behind the bar (needs allows_transparency).\n\
blur = false\n\
allows_transparency = true\n\
# \"ltr\" or \"rtl\". In rtl, right-edge bars retract toward the right.\n\
flow_direction = \"ltr\"\n\
# Background color.\n\
background = \"#1e1e2e\"\n\
# How long 'dockbar peek' reveals an auto-hidden bar, in milliseconds.\n\
peek_ms = 1000\n\
\n\
[auto_hide]\n\
# Delay before hiding once the pointer leaves, in milliseconds.\n\
delay_ms = 400\n\
# Delay before showing once the pointer arrives.\n\
show_delay_ms = 0\n\
# Slide durations.\n\
hide_animation_ms = 300\n\
show_animation_ms = 150\n\
# Pixels left on screen while hidden, so the pointer can find the bar.\n\
show_margin = 2.0\n\
\n\
[logging]\n\
# Write a log to ~/.config/dockbar/logs/dockbar.log.\n\
enabled = false\n\
# \"debug\", \"info\", \"warn\", or \"error\".\n\
level = \"info\"\n\
# Rotate the log once it reaches this size in megabytes.\n\
max_file_mb = 5\n\
\n\
[shell]\n\
# Set to true only when dockbar replaces Explorer as the shell.\n\
running_as_shell = false\n"
        .to_string()
}
