//! Scanner for the trajectory record grammar:
//!
//! ```text
//! record      := 'p' [beginlabel] triplet+ 'q' [endlabel]
//! triplet     := s1 s2 s3 [ 't' [ticklabel] ]
//! beginlabel  := 'b' pos '"' text '"'
//! endlabel    := 'e' pos '"' text '"'
//! ticklabel   := 'l' pos '"' text '"'
//! pos         := top|bot|lft|rt|ulft|urt|llft|lrt
//! ```
//!
//! `%` opens a line comment anywhere between tokens. Content trailing a
//! triplet line that is neither an optional token nor the record
//! terminator is ignored as commentary.

use log::debug;

use super::{Anchor, LabelSite, Trajectory};
use crate::error::{ParseError, Result};
use crate::math::Point3;

/// Parses the full input text into its trajectory blocks.
///
/// The whole input is consumed in one pass; every trajectory is fully
/// materialized so the caller can order hidden and visible strokes
/// globally without re-reading the source.
///
/// # Errors
///
/// Any grammar violation aborts the scan with a [`ParseError`]; capacity
/// overruns surface as [`crate::error::CapacityError`].
pub fn parse_trajectories(input: &str) -> Result<Vec<Trajectory>> {
    let mut scanner = Scanner::new(input);
    let mut trajectories = Vec::new();

    loop {
        scanner.skip_blanks_and_comments();
        if scanner.at_end() {
            break;
        }
        let line = scanner.line;
        let word = scanner.next_word();
        if word == "p" {
            debug!("new trajectory detected at line {line}");
            trajectories.push(scan_record(&mut scanner)?);
        } else {
            return Err(ParseError::UnexpectedToken { token: word, line }.into());
        }
    }

    Ok(trajectories)
}

fn scan_record(scanner: &mut Scanner) -> Result<Trajectory> {
    let mut trajectory = Trajectory::new();

    scanner.skip_blanks_and_comments();
    if scanner.peek_word() == "b" {
        scanner.next_word();
        let (anchor, text) = scan_label_tail(scanner)?;
        trajectory.push_label(LabelSite::Begin, anchor, text)?;
    }

    loop {
        scanner.skip_blanks_and_comments();
        if scanner.at_end() {
            return Err(ParseError::UnterminatedTrajectory { line: scanner.line }.into());
        }
        if scanner.peek_word() == "q" {
            scanner.next_word();
            break;
        }
        scan_triplet(scanner, &mut trajectory)?;
    }

    scanner.skip_blanks_and_comments();
    if scanner.peek_word() == "e" {
        scanner.next_word();
        let (anchor, text) = scan_label_tail(scanner)?;
        trajectory.push_label(LabelSite::End, anchor, text)?;
    }

    debug!("end of trajectory at line {}: {} points", scanner.line, trajectory.len());
    Ok(trajectory)
}

fn scan_triplet(scanner: &mut Scanner, trajectory: &mut Trajectory) -> Result<()> {
    let mut component = |name: &'static str| -> Result<f64> {
        scanner.skip_blanks_and_comments();
        let line = scanner.line;
        let word = scanner.next_word();
        word.parse().map_err(|_| {
            ParseError::BadTriplet {
                component: name,
                line,
            }
            .into()
        })
    };
    let s1 = component("S1")?;
    let s2 = component("S2")?;
    let s3 = component("S3")?;
    trajectory.push_point(Point3::new(s1, s2, s3))?;

    scanner.skip_blanks_and_comments();
    if scanner.peek_word() == "t" {
        scanner.next_word();
        trajectory.mark_tick()?;
        scanner.skip_blanks_and_comments();
        if scanner.peek_word() == "l" {
            scanner.next_word();
            let (anchor, text) = scan_label_tail(scanner)?;
            trajectory.push_label(LabelSite::Point(trajectory.len() - 1), anchor, text)?;
        }
    }
    scanner.skip_trailing_commentary();
    Ok(())
}

/// Scans `pos '"' text '"'` after a `b`/`e`/`l` marker.
fn scan_label_tail(scanner: &mut Scanner) -> Result<(Anchor, String)> {
    scanner.skip_blanks_and_comments();
    let line = scanner.line;
    let code = scanner.next_word();
    let Some(anchor) = Anchor::from_code(&code) else {
        return Err(ParseError::InvalidAnchor { code, line }.into());
    };
    let text = scanner.scan_quoted()?;
    Ok((anchor, text))
}

/// Character-level scanner with line tracking.
struct Scanner {
    src: Vec<char>,
    pos: usize,
    line: usize,
}

impl Scanner {
    fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(ch) = ch {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
            }
        }
        ch
    }

    /// Skips whitespace and `%` line comments.
    fn skip_blanks_and_comments(&mut self) {
        while let Some(&ch) = self.src.get(self.pos) {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '%' {
                while let Some(ch) = self.advance() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Consumes and returns the next whitespace-delimited word.
    fn next_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.src.get(self.pos) {
            if ch.is_whitespace() || ch == '%' || ch == '"' {
                break;
            }
            word.push(ch);
            self.advance();
        }
        word
    }

    /// Returns the next word without consuming it.
    fn peek_word(&mut self) -> String {
        let (pos, line) = (self.pos, self.line);
        let word = self.next_word();
        self.pos = pos;
        self.line = line;
        word
    }

    /// Scans a double-quoted label text, which must close on the same line.
    fn scan_quoted(&mut self) -> Result<String> {
        while matches!(self.src.get(self.pos), Some(' ' | '\t')) {
            self.advance();
        }
        if self.src.get(self.pos) != Some(&'"') {
            return Err(ParseError::MissingQuote { line: self.line }.into());
        }
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(text),
                Some('\n') | None => {
                    return Err(ParseError::UnterminatedQuote {
                        line: self.line,
                    }
                    .into())
                }
                Some(ch) => text.push(ch),
            }
        }
    }

    /// Discards non-token trailing content up to the end of the current
    /// line. Numbers, record markers and comments are left in place.
    fn skip_trailing_commentary(&mut self) {
        while matches!(self.src.get(self.pos), Some(' ' | '\t')) {
            self.advance();
        }
        match self.src.get(self.pos).copied() {
            None | Some('\n' | '%') => return,
            Some(ch) => {
                if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.') {
                    return;
                }
                if self.peek_word() == "q" {
                    return;
                }
            }
        }
        while let Some(&ch) = self.src.get(self.pos) {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StokesmapError;

    #[test]
    fn single_block_three_points() {
        let input = "p\n1 0 0\n0 1 0\n-1 0 0\nq\n";
        let trajectories = parse_trajectories(input).unwrap();
        assert_eq!(trajectories.len(), 1);
        let t = &trajectories[0];
        assert_eq!(t.len(), 3);
        assert_eq!(t.points()[2], Point3::new(-1.0, 0.0, 0.0));
        assert!(t.ticks().is_empty());
        assert!(t.labels().is_empty());
    }

    #[test]
    fn multiple_blocks() {
        let input = "p\n1 0 0\n0 1 0\nq\np\n0 0 1\n0 1 0\n1 0 0\nq\n";
        let trajectories = parse_trajectories(input).unwrap();
        assert_eq!(trajectories.len(), 2);
        assert_eq!(trajectories[0].len(), 2);
        assert_eq!(trajectories[1].len(), 3);
    }

    #[test]
    fn begin_and_end_labels() {
        let input = "p b ulft \"$t=0$\"\n1 0 0\n0 1 0\nq e rt \"$t=1$\"\n";
        let trajectories = parse_trajectories(input).unwrap();
        let t = &trajectories[0];
        assert_eq!(t.labels().len(), 2);
        assert_eq!(t.labels()[0].site, LabelSite::Begin);
        assert_eq!(t.labels()[0].anchor, Anchor::UpperLeft);
        assert_eq!(t.labels()[0].text, "$t=0$");
        assert_eq!(t.labels()[1].site, LabelSite::End);
        assert_eq!(t.labels()[1].text, "$t=1$");
    }

    #[test]
    fn ticks_and_tick_labels() {
        let input = "p\n1 0 0 t\n0 1 0 t l bot \"mid\"\n0 0 1\nq\n";
        let trajectories = parse_trajectories(input).unwrap();
        let t = &trajectories[0];
        assert_eq!(t.ticks(), &[0, 1]);
        assert_eq!(t.labels().len(), 1);
        assert_eq!(t.labels()[0].site, LabelSite::Point(1));
        assert_eq!(t.labels()[0].anchor, Anchor::Bottom);
    }

    #[test]
    fn comments_are_skipped() {
        let input = "% leading comment\np % open\n1 0 0 % inline\n% full line\n0 1 0\nq\n";
        let trajectories = parse_trajectories(input).unwrap();
        assert_eq!(trajectories[0].len(), 2);
    }

    #[test]
    fn trailing_commentary_is_ignored() {
        let input = "p\n1 0 0 sampled at 630nm\n0 1 0 t trailing words\nq\n";
        let trajectories = parse_trajectories(input).unwrap();
        let t = &trajectories[0];
        assert_eq!(t.len(), 2);
        assert_eq!(t.ticks(), &[1]);
    }

    #[test]
    fn missing_terminator_is_malformed() {
        let input = "p\n1 0 0\n0 1 0\n";
        let err = parse_trajectories(input).unwrap_err();
        assert!(matches!(
            err,
            StokesmapError::Parse(ParseError::UnterminatedTrajectory { .. })
        ));
    }

    #[test]
    fn bad_numeric_field_is_malformed() {
        let input = "p\n1 0 zz\nq\n";
        let err = parse_trajectories(input).unwrap_err();
        assert!(matches!(
            err,
            StokesmapError::Parse(ParseError::BadTriplet {
                component: "S3",
                line: 2,
            })
        ));
    }

    #[test]
    fn invalid_anchor_code_is_malformed() {
        let input = "p b middle \"oops\"\n1 0 0\nq\n";
        let err = parse_trajectories(input).unwrap_err();
        assert!(matches!(
            err,
            StokesmapError::Parse(ParseError::InvalidAnchor { .. })
        ));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let input = "p b top \"no closing\n1 0 0\nq\n";
        let err = parse_trajectories(input).unwrap_err();
        assert!(matches!(
            err,
            StokesmapError::Parse(ParseError::UnterminatedQuote { .. })
        ));
    }

    #[test]
    fn stray_token_outside_record() {
        let input = "x\n";
        let err = parse_trajectories(input).unwrap_err();
        assert!(matches!(
            err,
            StokesmapError::Parse(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn q_on_triplet_line_terminates() {
        let input = "p\n1 0 0\n0 1 0 q\n";
        let trajectories = parse_trajectories(input).unwrap();
        assert_eq!(trajectories[0].len(), 2);
    }

    #[test]
    fn signed_and_exponent_numbers() {
        let input = "p\n-0.5 +0.25 1e-3\n0.1 0.2 0.3\nq\n";
        let trajectories = parse_trajectories(input).unwrap();
        let p = trajectories[0].points()[0];
        assert!((p.x + 0.5).abs() < 1e-12);
        assert!((p.y - 0.25).abs() < 1e-12);
        assert!((p.z - 1e-3).abs() < 1e-12);
    }
}
