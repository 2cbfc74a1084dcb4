use super::Pass;
use crate::error::MinifyError;
use crate::scan::Scanner;

pub struct StripComments;

impl Pass for StripComments {
    fn name(&self) -> &'static str {
        "comments"
    }

    fn apply(&self, src: &str) -> Result<String, MinifyError> {
        let mut scanner = Scanner::new(src);
        let mut out = String::with_capacity(src.len());
        while let Some(ch) = scanner.advance()? {
            if !scanner.is_inside_comment() {
                out.push(ch);
            }
        }
        Ok(out)
    }
}
