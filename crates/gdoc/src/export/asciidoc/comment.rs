//! Reflow of Go doc comments into AsciiDoc.
//!
//! Doc comments mark lists with `-` and preformatted text with indentation.
//! Both need explicit markup in AsciiDoc, so comments go through a small
//! line-based state machine before insertion:
//!
//! ```text
//!            list item              blank / unindented
//!   Normal ─────────────▶ InList ──────────────────────▶ Normal
//!     │                                                   ▲
//!     │ indented line                blank / unindented   │
//!     └──────────────────▶ InIndentedBlock ───────────────┘
//! ```
//!
//! Leaving a run flushes it as one block. The end of input always flushes.

use super::markup::{LINE_BREAK, Role, padding, pass_through, styled};

/// Columns a tab advances in an indented run.
const TAB_WIDTH: usize = 4;

const LIST_MARKER: &str = "- ";
const BULLET: &str = "* ";
const CAPTION_MARKER: &str = "# ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReflowState {
    Normal,
    InList,
    InIndentedBlock,
}

#[derive(Debug)]
struct Reflow {
    state: ReflowState,
    run: Vec<String>,
    output: Vec<String>,
}

impl Reflow {
    fn new() -> Self {
        Self {
            state: ReflowState::Normal,
            run: Vec::new(),
            output: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        match self.state {
            ReflowState::Normal => self.push_normal(line),
            ReflowState::InList => {
                if is_blank(line) || (!is_indented(line) && !is_list_item(line)) {
                    self.flush();
                    self.push_normal(line);
                } else if is_list_item(line) {
                    self.run.push(bullet(line));
                } else if let Some(item) = self.run.last_mut() {
                    // Continuation of the previous item.
                    item.push(' ');
                    item.push_str(line.trim());
                }
            }
            ReflowState::InIndentedBlock => {
                if is_blank(line) || !is_indented(line) {
                    self.flush();
                    self.push_normal(line);
                } else {
                    self.run.push(preformatted(line));
                }
            }
        }
    }

    fn push_normal(&mut self, line: &str) {
        if is_list_item(line) {
            self.state = ReflowState::InList;
            self.run.push(bullet(line));
        } else if is_indented(line) && !is_blank(line) {
            self.state = ReflowState::InIndentedBlock;
            self.run.push(preformatted(line));
        } else if let Some(caption) = line.strip_prefix(CAPTION_MARKER) {
            self.output.push(styled(Role::Caption, caption.trim()));
        } else {
            self.output.push(line.to_string());
        }
    }

    fn flush(&mut self) {
        let run = std::mem::take(&mut self.run);
        match self.state {
            ReflowState::Normal => {}
            ReflowState::InList => {
                // Lists need a blank line on both sides.
                self.output.push(String::new());
                self.output.extend(run);
                self.output.push(String::new());
            }
            ReflowState::InIndentedBlock => {
                let block = styled(Role::Code, &run.join(LINE_BREAK));
                self.output.push(format!("{block}{}", LINE_BREAK.trim_end()));
            }
        }
        self.state = ReflowState::Normal;
    }

    fn finish(mut self) -> String {
        self.flush();
        self.output.join("\n")
    }
}

/// Rewrites lists, preformatted runs and captions of a doc comment.
pub fn reflow(text: &str) -> String {
    let mut reflow = Reflow::new();
    for line in text.lines() {
        reflow.push_line(line);
    }
    reflow.finish()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with(LIST_MARKER) || trimmed == LIST_MARKER.trim_end()
}

fn bullet(line: &str) -> String {
    let trimmed = line.trim_start();
    let item = trimmed
        .strip_prefix(LIST_MARKER.trim_end())
        .unwrap_or(trimmed)
        .trim_start();
    format!("{BULLET}{item}")
}

/// Keeps the indentation of a preformatted line as non-breaking padding.
fn preformatted(line: &str) -> String {
    let width: usize = line
        .chars()
        .take_while(|c| matches!(c, ' ' | '\t'))
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum();
    format!("{}{}", padding(width), pass_through(line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_unchanged() {
        let text = "First paragraph.\n\nSecond paragraph\nwith two lines.";
        assert_eq!(reflow(text), text);
    }

    #[test]
    fn test_indented_line_becomes_one_block() {
        let reflowed = reflow("Example:\n\tcart.Add(p)\n\nNext paragraph.");

        assert_eq!(
            reflowed,
            "Example:\n\
             [code]#{nbsp}{nbsp}{nbsp}{nbsp}pass:[cart.Add(p)]# +\n\
             \n\
             Next paragraph."
        );
        assert_eq!(reflowed.matches("[code]#").count(), 1);
    }

    #[test]
    fn test_indented_run_is_joined() {
        let reflowed = reflow("  a := 1\n    b := 2");

        assert_eq!(
            reflowed,
            "[code]#{nbsp}{nbsp}pass:[a := 1] +\n{nbsp}{nbsp}{nbsp}{nbsp}pass:[b := 2]# +"
        );
    }

    #[test]
    fn test_indented_run_ends_at_unindented_line() {
        let reflowed = reflow(" x\nafter");
        assert_eq!(reflowed, "[code]#{nbsp}pass:[x]# +\nafter");
    }

    #[test]
    fn test_list_markers_are_rewritten() {
        let reflowed = reflow("Options:\n  - fast\n  - safe\nDone.");
        assert_eq!(reflowed, "Options:\n\n* fast\n* safe\n\nDone.");
    }

    #[test]
    fn test_list_continuation_lines() {
        let reflowed = reflow("- first item\n  continues here\n- second");
        assert_eq!(reflowed, "\n* first item continues here\n* second\n");
    }

    #[test]
    fn test_list_at_end_of_input_is_flushed() {
        assert_eq!(reflow("- only"), "\n* only\n");
    }

    #[test]
    fn test_caption() {
        assert_eq!(
            reflow("# Usage\nCall it."),
            "[caption]#Usage#\nCall it."
        );
    }

    #[test]
    fn test_hyphenated_words_are_not_lists() {
        let text = "-1 means unlimited\nnon-nil values";
        assert_eq!(reflow(text), text);
    }

    #[test]
    fn test_empty() {
        assert_eq!(reflow(""), "");
    }
}
