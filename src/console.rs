use std::io::BufRead;

pub const TOTAL_STEPS: usize = 7;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn banner(title: &str) {
    println!("{RULE}");
    println!("{title}");
    println!("{RULE}\n");
}

pub fn step(n: usize, title: &str) {
    println!("[{n}/{TOTAL_STEPS}] {title}");
}

pub fn ok(msg: &str) {
    println!("  ✓ {msg}");
}

pub fn warn(msg: &str) {
    crate::safe_eprintln!("  ⚠ {msg}");
}

#[derive(Debug, Clone)]
pub struct ErrorPanel<'a> {
    pub title: &'a str,
    pub cause: &'a str,
    pub link: Option<&'a str>,
    pub note: Option<&'a str>,
}

pub fn render_panel(p: &ErrorPanel) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("✗ {}\n", p.title));
    out.push_str(&format!("  {}\n", p.cause));
    if let Some(link) = p.link {
        out.push_str(&format!("  Download: {link}\n"));
    }
    if let Some(note) = p.note {
        out.push_str(&format!("  Note: {note}\n"));
    }
    out.push_str(RULE);
    out
}

pub fn error_panel(p: &ErrorPanel) {
    crate::safe_eprintln!("{}", render_panel(p));
}

/// Keep the console alive so the user can read whatever the child printed
/// before the window closes. Best-effort; a closed stdin just falls through.
pub fn hold_open() {
    println!("\nPress Enter to close...");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_carries_title_cause_link_and_note() {
        let p = ErrorPanel {
            title: "FFmpeg not found",
            cause: "FFmpeg converts audio files before transcription.",
            link: Some("https://ffmpeg.org/download.html"),
            note: Some("add the ffmpeg binary directory to PATH"),
        };
        let s = render_panel(&p);
        assert!(s.contains("✗ FFmpeg not found"));
        assert!(s.contains("converts audio files"));
        assert!(s.contains("Download: https://ffmpeg.org/download.html"));
        assert!(s.contains("Note: add the ffmpeg"));
    }

    #[test]
    fn panel_omits_absent_link_and_note_lines() {
        let p = ErrorPanel {
            title: "Application exited abnormally",
            cause: "See the output above for details.",
            link: None,
            note: None,
        };
        let s = render_panel(&p);
        assert!(!s.contains("Download:"));
        assert!(!s.contains("Note:"));
    }
}
