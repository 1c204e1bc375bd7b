/// Key bindings shown on the Help page, one row each
pub const BINDINGS: &[(&str, &str)] = &[
    ("Enter l \u{2192}", "Open the selected item"),
    ("q Esc h \u{2190}", "Go back (quit on the boards page)"),
    ("j \u{2193}", "Move cursor down"),
    ("k \u{2191}", "Move cursor up"),
    ("?", "Show this help"),
    ("Q Ctrl+C", "Quit immediately"),
];

pub fn help_lines() -> Vec<String> {
    BINDINGS
        .iter()
        .map(|(keys, desc)| format!(" {:<12}{}", keys, desc))
        .collect()
}
