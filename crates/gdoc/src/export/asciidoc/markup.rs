//! AsciiDoc markup primitives.

/// Hard line break inside a paragraph or block.
pub const LINE_BREAK: &str = " +\n";

/// Non-breaking space; plain spaces collapse in AsciiDoc output.
pub const NBSP: &str = "{nbsp}";

/// Thematic break between struct sections.
pub const SEPARATOR: &str = "'''";

/// Body of a struct without exported fields.
pub const HIDDEN_FIELDS_NOTICE: &str = "// contains filtered or unexported fields";

/// Columns of indentation inside signature blocks.
pub const INDENT_WIDTH: usize = 2;

/// Inline roles used to style source fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Keyword,
    Type,
    Builtin,
    Name,
    Variable,
    Operator,
    Comment,
    Information,
    Code,
    Caption,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Keyword => "keyword",
            Role::Type => "type",
            Role::Builtin => "builtin",
            Role::Name => "name",
            Role::Variable => "variable",
            Role::Operator => "operator",
            Role::Comment => "comment",
            Role::Information => "information",
            Role::Code => "code",
            Role::Caption => "caption",
        }
    }
}

/// `[role]#text#`
pub fn styled(role: Role, text: &str) -> String {
    format!("[{}]#{text}#", role.as_str())
}

/// `[[id]]`
pub fn anchor(id: &str) -> String {
    format!("[[{id}]]")
}

/// `<<target,label>>`
pub fn cross_reference(target: &str, label: &str) -> String {
    format!("<<{target},{label}>>")
}

pub fn code_block(body: &str) -> String {
    format!("[.code]\n****\n{body}\n****")
}

/// Section title of the given level, `== Title` for level 2.
pub fn title(level: usize, text: &str) -> String {
    format!("{} {text}", "=".repeat(level))
}

pub fn bold(text: &str) -> String {
    format!("*{text}*")
}

/// Passes `text` through without substitutions.
pub fn pass_through(text: &str) -> String {
    format!("pass:[{}]", text.replace(']', "\\]"))
}

/// `width` non-breaking spaces.
pub fn padding(width: usize) -> String {
    NBSP.repeat(width)
}

/// Indentation for `depth` nesting levels.
pub fn indent(depth: usize) -> String {
    padding(depth * INDENT_WIDTH)
}

/// Escapes characters of a type prefix that AsciiDoc would read as markup.
pub fn escape_prefix(prefix: &str) -> String {
    if prefix.contains('*') {
        prefix.replace('*', &pass_through("*"))
    } else {
        prefix.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled() {
        assert_eq!(styled(Role::Keyword, "func"), "[keyword]#func#");
    }

    #[test]
    fn test_code_block() {
        assert_eq!(code_block("x"), "[.code]\n****\nx\n****");
    }

    #[test]
    fn test_title() {
        assert_eq!(title(3, "Structs"), "=== Structs");
    }

    #[test]
    fn test_pass_through_escapes_brackets() {
        assert_eq!(pass_through("func() []int"), "pass:[func() [\\]int]");
    }

    #[test]
    fn test_escape_prefix() {
        assert_eq!(escape_prefix("[]*"), "[]pass:[*]");
        assert_eq!(escape_prefix("[4]"), "[4]");
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent(1), "{nbsp}{nbsp}");
        assert_eq!(padding(0), "");
    }
}
