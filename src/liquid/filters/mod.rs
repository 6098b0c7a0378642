mod full_date;
mod regex_replace;

use liquid::ParserBuilder;

/// Register custom filters for use in Liquid templates
pub fn register_filters(parser_builder: ParserBuilder) -> ParserBuilder {
    parser_builder
        .filter(full_date::FullDateFilterParser)
        .filter(regex_replace::RegexReplace)
}
