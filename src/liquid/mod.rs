pub mod convert;
pub mod filters;

use std::collections::HashMap;

use liquid::{Object, Parser, ParserBuilder};
use log::debug;

use crate::utils::error::{BoxResult, SiteError};

type Partials = liquid::partials::EagerCompiler<liquid::partials::InMemorySource>;

/// Create the Liquid parser with the stdlib, the site filters and the given
/// includes registered as partials.
pub fn create_parser(includes: &HashMap<String, String>) -> BoxResult<Parser> {
    let mut partials = Partials::empty();
    for (name, source) in includes {
        partials.add(name.clone(), source.clone());
    }

    let parser_builder = ParserBuilder::with_stdlib().partials(partials);
    let parser = filters::register_filters(parser_builder)
        .build()
        .map_err(|e| SiteError::Template(format!("Failed to build Liquid parser: {}", e)))?;

    debug!("Liquid parser ready with {} includes", includes.len());
    Ok(parser)
}

/// Parse and render `content` with Liquid
pub fn render_liquid(content: &str, parser: &Parser, globals: &Object) -> BoxResult<String> {
    let template = parser
        .parse(content)
        .map_err(|e| SiteError::Template(format!("Error parsing Liquid template: {}", e)))?;

    template.render(globals).map_err(|e| {
        debug!("Available globals: {:?}", globals.keys().collect::<Vec<_>>());
        SiteError::Template(format!("Error rendering Liquid template: {}", e)).into()
    })
}
