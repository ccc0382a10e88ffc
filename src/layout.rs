// Text blocks shared by all commands: the banner, framed titles and
// section dividers.

pub const DIVIDER_WIDTH: usize = 40;

pub fn banner() -> String {
    [
        "--------------------------------------------------------------",
        "|                         A E X U S                          |",
        "|                Autonomous Extraction System                |",
        "|             Signal Processing and Scenario Core            |",
        "|                                                            |",
        "|     Channel: Command-Line Endpoint                         |",
        "|     Actions are recorded into the local progression ledger |",
        "--------------------------------------------------------------",
    ]
    .join("\n")
}

/// Box-drawn title with four spaces of padding on each side.
pub fn frame_title(text: &str) -> String {
    let pad = 4;
    let inner = text.chars().count() + pad * 2;
    [
        format!("┌{}┐", "─".repeat(inner)),
        format!("│{}{}{}│", " ".repeat(pad), text, " ".repeat(pad)),
        format!("└{}┘", "─".repeat(inner)),
    ]
    .join("\n")
}

pub fn divider() -> String {
    "-".repeat(DIVIDER_WIDTH)
}

/// Blank line, label, divider.
pub fn section(label: &str) -> String {
    format!("\n{}\n{}", label, divider())
}
