use liquid_core::{Display_filter, Filter, FilterParameters, FilterReflection, FromFilterParameters, ParseFilter};
use liquid_core::{Error as LiquidError, Expression, Result as LiquidResult, Runtime};
use liquid_core::{Value, ValueView};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // `$$`, a one or two digit group reference, or any other `$`
    static ref GROUP_REFERENCE_REGEX: Regex = Regex::new(r"\$\$|\$(\d{1,2})|\$").unwrap();
}

#[derive(Debug, FilterParameters)]
struct RegexReplaceArgs {
    #[parameter(description = "The regular expression to search for.", arg_type = "str")]
    pattern: Expression,
    #[parameter(description = "The replacement text; $1 to $99 insert groups and $$ inserts a dollar sign.", arg_type = "str")]
    replacement: Option<Expression>,
}

/// Replaces every match of a regular expression, like `replace` but with a pattern
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "regex_replace",
    description = "Replaces every match of a regular expression in a string.",
    parameters(RegexReplaceArgs),
    parsed(RegexReplaceFilter)
)]
pub struct RegexReplace;

#[derive(Debug, FromFilterParameters, Display_filter)]
#[name = "regex_replace"]
struct RegexReplaceFilter {
    #[parameters]
    args: RegexReplaceArgs,
}

impl Filter for RegexReplaceFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> LiquidResult<Value> {
        let args = self.args.evaluate(runtime)?;
        let input = input.to_kstr();

        let re = Regex::new(args.pattern.as_str()).map_err(|e| {
            LiquidError::with_msg(format!("regex_replace: invalid pattern: {}", e))
        })?;
        let replacement = args.replacement.map(|r| r.to_string()).unwrap_or_default();
        let replacement = expand_group_references(&replacement, re.captures_len());

        Ok(Value::scalar(re.replace_all(input.as_str(), replacement.as_str()).into_owned()))
    }
}

/// Rewrite a replacement so the regex crate reads it the way templates write
/// it. `$N` becomes `${N}`, so `$1a` is group 1 then `a`. A two digit
/// reference to a missing group falls back to the one digit group and a
/// literal digit. Any other `$` is literal.
fn expand_group_references(replacement: &str, captures_len: usize) -> String {
    let is_group = |n: usize| n >= 1 && n < captures_len;

    GROUP_REFERENCE_REGEX
        .replace_all(replacement, |caps: &Captures| {
            let digits = match caps.get(1) {
                Some(digits) => digits.as_str(),
                None => return "$$".to_string(),
            };
            let n: usize = digits.parse().unwrap_or(0);

            if is_group(n) {
                format!("${{{}}}", n)
            } else if digits.len() == 2 && is_group(n / 10) {
                format!("${{{}}}{}", n / 10, n % 10)
            } else {
                format!("$${}", digits)
            }
        })
        .into_owned()
}
