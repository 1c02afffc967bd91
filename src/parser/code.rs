//! `.code` and `.play` commands.
//!
//! Syntax: `.code [-edit] [-numbers] file [address]`. The address selects a
//! line range of the file:
//!
//! - `12` a single line, `12,20` a range, `$` the last line
//! - `/regexp/` the first matching line
//! - `/start/,/end/` from the first `start` match through the next `end`
//!
//! Lines ending in `OMIT` are dropped from the excerpt.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Code, CodeLine};

/// Parse a `.code`/`.play` command line and load the referenced file.
pub(super) fn parse_code(base_dir: &Path, name: &str, lineno: usize, cmd: &str) -> Result<Code> {
    let (command, mut rest) = next_field(cmd);
    let play = command == ".play";

    let mut edit = false;
    let mut numbers = false;
    let file = loop {
        let (field, tail) = next_field(rest);
        rest = tail;
        match field {
            "" => return Err(Error::parse_at(name, lineno, format!("missing file name: {:?}", cmd))),
            "-edit" => edit = true,
            "-numbers" => numbers = true,
            flag if flag.starts_with('-') => {
                return Err(Error::parse_at(name, lineno, format!("unknown flag {:?}", flag)))
            }
            file => break file,
        }
    };

    let path = base_dir.join(file);
    let source = fs::read_to_string(&path).map_err(|e| {
        Error::parse_at(name, lineno, format!("cannot read {}: {}", path.display(), e))
    })?;
    let all: Vec<&str> = source.lines().collect();

    let (lo, hi) = resolve_address(rest.trim(), &all)
        .map_err(|msg| Error::parse_at(name, lineno, format!("{}: {}", file, msg)))?;
    log::debug!("{}:{}: {} lines {}..{}", name, lineno, file, lo + 1, hi);

    let file_name = Path::new(file)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(file);
    let mut code = Code::new(file_name, "").with_play(play);
    code.edit = edit;
    code.numbers = numbers;
    code.lines = all[lo..hi]
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim_end().ends_with("OMIT"))
        .map(|(i, line)| CodeLine::new(lo + i + 1, *line))
        .collect();

    if play {
        code.prefix = join_lines(&all[..lo]);
        code.suffix = join_lines(&all[hi..]);
    }

    Ok(code)
}

/// Split off the first whitespace-separated field.
fn next_field(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

fn join_lines(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

/// One side of an address.
enum Addr {
    Line(usize),
    Last,
    Pattern(Regex),
}

/// Resolve an address into a half-open, 0-based line range.
fn resolve_address(addr: &str, lines: &[&str]) -> std::result::Result<(usize, usize), String> {
    if addr.is_empty() {
        return Ok((0, lines.len()));
    }

    let (first, rest) = parse_addr(addr)?;
    let (start, col) = locate(&first, lines, (0, 0))?;

    let rest = rest.trim_start();
    let end = if rest.is_empty() {
        start
    } else if let Some(second) = rest.strip_prefix(',') {
        let (second, trailing) = parse_addr(second.trim_start())?;
        if !trailing.trim().is_empty() {
            return Err(format!("unexpected {:?} after address", trailing.trim()));
        }
        // The second search resumes right after the first match.
        locate(&second, lines, (start, col))?.0
    } else {
        return Err(format!("malformed address {:?}", addr));
    };

    if end < start {
        return Err(format!("address {:?} ends before it starts", addr));
    }
    Ok((start, end + 1))
}

fn parse_addr(s: &str) -> std::result::Result<(Addr, &str), String> {
    if let Some(rest) = s.strip_prefix('$') {
        return Ok((Addr::Last, rest));
    }

    if let Some(body) = s.strip_prefix('/') {
        let mut escaped = false;
        for (i, c) in body.char_indices() {
            match c {
                '\\' if !escaped => escaped = true,
                '/' if !escaped => {
                    let pattern = body[..i].replace("\\/", "/");
                    let re = Regex::new(&pattern)
                        .map_err(|e| format!("bad pattern {:?}: {}", pattern, e))?;
                    return Ok((Addr::Pattern(re), &body[i + 1..]));
                }
                _ => escaped = false,
            }
        }
        return Err(format!("unterminated pattern {:?}", s));
    }

    let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits == 0 {
        return Err(format!("malformed address {:?}", s));
    }
    let n: usize = s[..digits]
        .parse()
        .map_err(|_| format!("bad line number {:?}", &s[..digits]))?;
    Ok((Addr::Line(n), &s[digits..]))
}

/// Find the 0-based line an address refers to, plus the byte offset in
/// that line where a following search resumes.
///
/// Patterns are searched from `from`: the rest of that line first, then
/// the lines after it.
fn locate(
    addr: &Addr,
    lines: &[&str],
    from: (usize, usize),
) -> std::result::Result<(usize, usize), String> {
    match addr {
        Addr::Line(n) if *n >= 1 && *n <= lines.len() => Ok((n - 1, lines[n - 1].len())),
        Addr::Line(n) => Err(format!("line {} out of range (file has {} lines)", n, lines.len())),
        Addr::Last => match lines.last() {
            Some(last) => Ok((lines.len() - 1, last.len())),
            None => Err("file is empty".to_string()),
        },
        Addr::Pattern(re) => {
            let (line, col) = from;
            let same_line = lines
                .get(line)
                .and_then(|text| text.get(col..))
                .and_then(|tail| re.find(tail))
                .map(|m| (line, col + m.end()));
            same_line
                .or_else(|| {
                    lines
                        .iter()
                        .enumerate()
                        .skip(line + 1)
                        .find_map(|(i, text)| re.find(text).map(|m| (i, m.end())))
                })
                .ok_or_else(|| format!("no match for /{}/", re.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HELLO: &str = "package main\n\
                         \n\
                         import \"fmt\" // OMIT\n\
                         \n\
                         func main() {\n\
                         \tfmt.Println(\"hello\")\n\
                         }\n";

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.go"), HELLO).unwrap();
        dir
    }

    #[test]
    fn test_whole_file_drops_omit_lines() {
        let dir = fixture();
        let code = parse_code(dir.path(), "t.slide", 3, ".code hello.go").unwrap();

        assert_eq!(code.ext, ".go");
        assert_eq!(code.file_name, "hello.go");
        assert!(!code.play);
        assert_eq!(code.lines.len(), 6);
        assert!(code.lines.iter().all(|l| !l.text.contains("OMIT")));
        assert_eq!(code.lines[3], CodeLine::new(5, "func main() {"));
    }

    #[test]
    fn test_play_with_pattern_range() {
        let dir = fixture();
        let code = parse_code(dir.path(), "t.slide", 3, ".play -edit hello.go /^func main/,/^}/")
            .unwrap();
        assert!(code.play);
        assert!(code.edit);
        assert_eq!(code.lines.len(), 3);
        assert_eq!(code.lines[0].number, 5);
        assert!(code.prefix.starts_with("package main\n"));
        assert_eq!(code.suffix, "");
    }

    #[test]
    fn test_numeric_addresses() {
        let lines = vec!["a", "b", "c", "d"];
        assert_eq!(resolve_address("2", &lines).unwrap(), (1, 2));
        assert_eq!(resolve_address("2,3", &lines).unwrap(), (1, 3));
        assert_eq!(resolve_address("3,$", &lines).unwrap(), (2, 4));
        assert!(resolve_address("9", &lines).is_err());
        assert!(resolve_address("3,1", &lines).is_err());
    }

    #[test]
    fn test_pattern_addresses() {
        let lines = vec!["x", "start", "y", "end", "end"];
        assert_eq!(resolve_address("/start/,/end/", &lines).unwrap(), (1, 4));
        assert_eq!(resolve_address("/y/", &lines).unwrap(), (2, 3));
        assert!(resolve_address("/nope/", &lines).is_err());
        assert!(resolve_address("/open", &lines).is_err());
    }

    #[test]
    fn test_second_pattern_resumes_after_first_match() {
        let lines = vec!["a one", "mid", "a two"];
        assert_eq!(resolve_address("/a/,/a/", &lines).unwrap(), (0, 3));

        // A match later on the same line still ends the range there.
        let lines = vec!["func f() { return }", "func g() {", "}"];
        assert_eq!(resolve_address("/func f/,/}/", &lines).unwrap(), (0, 1));
        assert_eq!(resolve_address("/func g/,/}/", &lines).unwrap(), (1, 3));
    }

    #[test]
    fn test_pattern_after_line_number() {
        let lines = vec!["end", "body", "end"];
        assert_eq!(resolve_address("1,/end/", &lines).unwrap(), (0, 3));
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let dir = fixture();
        let err = parse_code(dir.path(), "t.slide", 7, ".code nope.go").unwrap_err();
        assert!(err.to_string().contains("t.slide:7"));
    }

    #[test]
    fn test_unknown_flag() {
        let dir = fixture();
        let result = parse_code(dir.path(), "t.slide", 1, ".code -bogus hello.go");
        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
