//! Extraction from the published HTML documentation.
//!
//! The page is flattened into a sequence of blocks in document order. Each `h4` heading opens a
//! section that runs until the next heading, and a section only reads the tables, lists and
//! paragraphs inside it.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{RawField, RawReturn, RawSection, RawType};
use crate::{
    error::{ForgeError, Result},
    model::Verb,
    registry::{Registry, SectionKind},
};

/// Link target whose enclosing element marks the start of the API reference.
pub const START_ANCHOR: &str = "#getting-updates";

/// Compile a selector that is known to be valid.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

/// Anchor inside the heading that opens the API reference.
static START: Lazy<Selector> = Lazy::new(|| selector(&format!(r#"a[href="{START_ANCHOR}"]"#)));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("td"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Elements of interest, in document order.
#[derive(Debug)]
enum Block<'a> {
    Heading(String),
    Paragraph(String),
    Table(ElementRef<'a>),
    List(ElementRef<'a>),
}

/// Text content of an element with whitespace runs collapsed.
fn text_of(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Flatten everything after the start marker into blocks.
fn blocks(document: &Html) -> Result<Vec<Block<'_>>> {
    let anchor = document.select(&START).next().ok_or_else(|| {
        ForgeError::extraction("document", format!("no link to {START_ANCHOR} found"))
    })?;
    let start = anchor.parent().and_then(ElementRef::wrap).unwrap_or(anchor);
    let start_id = (*start).id();

    let mut started = false;
    let mut out = Vec::new();
    for node in document.tree.root().descendants() {
        if node.id() == start_id {
            started = true;
            continue;
        }
        if !started {
            continue;
        }
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        match element.value().name() {
            "h4" => out.push(Block::Heading(text_of(element))),
            "p" => out.push(Block::Paragraph(text_of(element))),
            "table" => out.push(Block::Table(element)),
            "ul" => out.push(Block::List(element)),
            _ => {}
        }
    }
    Ok(out)
}

/// Read `(name, type, optionality)` rows, skipping the header row.
fn read_table(section: &str, table: ElementRef<'_>) -> Result<Vec<RawField>> {
    table
        .select(&ROW)
        .skip(1)
        .enumerate()
        .map(|(index, row)| {
            let cells: Vec<String> = row.select(&CELL).map(text_of).collect();
            let [name, ty, optional, ..] = cells.as_slice() else {
                return Err(ForgeError::extraction(
                    section,
                    format!("table row {} has {} cells, expected 3", index + 1, cells.len()),
                ));
            };
            Ok(RawField {
                name: name.clone(),
                ty: RawType::Text(ty.clone()),
                optional: optional == "Optional" || optional.starts_with("Optional."),
            })
        })
        .collect()
}

/// Direct `li` children of a list.
fn list_items(list: ElementRef<'_>) -> Vec<String> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(text_of)
        .collect()
}

/// First table inside a section.
fn section_table<'a>(body: &[Block<'a>]) -> Option<ElementRef<'a>> {
    body.iter().find_map(|block| match block {
        Block::Table(table) => Some(*table),
        _ => None,
    })
}

/// Parameters of a method section. A missing table is an error unless the method is tableless.
fn method_fields(registry: &Registry, name: &str, body: &[Block<'_>]) -> Result<Vec<RawField>> {
    if registry.is_tableless(name) {
        debug!(name, "tableless method, no parameters");
        return Ok(Vec::new());
    }
    let table =
        section_table(body).ok_or_else(|| ForgeError::extraction(name, "no parameter table"))?;
    read_table(name, table)
}

/// Fields of a model section. Placeholder models have no table and get no fields.
fn model_fields(registry: &Registry, name: &str, body: &[Block<'_>]) -> Result<Vec<RawField>> {
    match section_table(body) {
        Some(table) if !registry.is_tableless(name) => read_table(name, table),
        _ => {
            debug!(name, "placeholder model, no fields");
            Ok(Vec::new())
        }
    }
}

/// Extract classified sections from an HTML documentation page.
pub fn extract_html(html: &str, registry: &mut Registry) -> Result<Vec<RawSection>> {
    let document = Html::parse_document(html);
    let blocks = blocks(&document)?;

    let mut sections = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        let Block::Heading(name) = block else {
            continue;
        };
        let rest = &blocks[index + 1..];
        let end = rest
            .iter()
            .position(|block| matches!(block, Block::Heading(_)))
            .unwrap_or(rest.len());
        let body = &rest[..end];

        match registry.classify(name) {
            SectionKind::Skip => {}
            SectionKind::Generic => {
                debug!(%name, "extracting generic");
                let list = body
                    .iter()
                    .find_map(|block| match block {
                        Block::List(list) => Some(*list),
                        _ => None,
                    })
                    .ok_or_else(|| ForgeError::extraction(name, "no subtype list"))?;
                sections.push(RawSection::Generic {
                    name: name.clone(),
                    subtypes: list_items(list),
                });
            }
            SectionKind::Model => {
                debug!(%name, "extracting model");
                sections.push(RawSection::Model {
                    name: name.clone(),
                    fields: model_fields(registry, name, body)?,
                });
            }
            SectionKind::Method => {
                debug!(%name, "extracting method");
                let description = body
                    .iter()
                    .find_map(|block| match block {
                        Block::Paragraph(text) => Some(text.clone()),
                        _ => None,
                    })
                    .unwrap_or_default();
                sections.push(RawSection::Method {
                    name: name.clone(),
                    verb: Verb::for_method(name),
                    fields: method_fields(registry, name, body)?,
                    returns: RawReturn::Prose(description),
                });
            }
        }
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r##"
        <html><body>
        <h3><a class="anchor" href="#recent-changes"></a>Recent changes</h3>
        <h4>ignoredBefore</h4>
        <h3><a class="anchor" href="#getting-updates"></a>Getting updates</h3>
        <h4><a class="anchor" href="#update"><i class="anchor-icon"></i></a>Update</h4>
        <p>This object represents an incoming update.</p>
        <table>
          <tr><th>Field</th><th>Type</th><th>Description</th></tr>
          <tr><td>update_id</td><td>Integer</td><td>The update's unique identifier.</td></tr>
          <tr><td>message</td><td>Message</td><td><em>Optional</em>. New incoming message.</td></tr>
        </table>
        <h4>getUpdates</h4>
        <p>Use this method to receive incoming updates. An Array of Update objects is returned.</p>
        <table>
          <tr><th>Parameter</th><th>Type</th><th>Required</th><th>Description</th></tr>
          <tr><td>offset</td><td>Integer</td><td>Optional</td><td>Identifier.</td></tr>
          <tr><td>allowed_updates</td><td>Array of String</td><td>Optional</td><td>Types.</td></tr>
        </table>
        <h4>Available types</h4>
        <h4>getMe</h4>
        <p>Requires no parameters. Returns basic information about the bot in form of a User object.</p>
        <h4>InputMessageContent</h4>
        <p>This object represents the content of a message to be sent.</p>
        <ul>
          <li>InputTextMessageContent</li>
          <li>InputLocationMessageContent</li>
        </ul>
        </body></html>
    "##;

    #[test]
    fn extracts_sections_after_start() {
        let mut registry = Registry::new();
        let sections = extract_html(PAGE, &mut registry).unwrap();

        assert_eq!(sections.len(), 4);
        assert_eq!(
            sections[0],
            RawSection::Model {
                name: "Update".into(),
                fields: vec![
                    RawField {
                        name: "update_id".into(),
                        ty: RawType::Text("Integer".into()),
                        optional: false,
                    },
                    RawField {
                        name: "message".into(),
                        ty: RawType::Text("Message".into()),
                        optional: true,
                    },
                ],
            }
        );

        let RawSection::Method {
            name,
            verb,
            fields,
            returns,
        } = &sections[1]
        else {
            panic!("expected a method, got {:?}", sections[1]);
        };
        assert_eq!(name, "getUpdates");
        assert_eq!(*verb, Verb::Get);
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|field| field.optional));
        assert_eq!(
            *returns,
            RawReturn::Prose(
                "Use this method to receive incoming updates. An Array of Update objects is \
                 returned."
                    .into()
            )
        );

        let RawSection::Method { name, fields, .. } = &sections[2] else {
            panic!("expected a method, got {:?}", sections[2]);
        };
        assert_eq!(name, "getMe");
        assert!(fields.is_empty());

        assert_eq!(
            sections[3],
            RawSection::Generic {
                name: "InputMessageContent".into(),
                subtypes: vec![
                    "InputTextMessageContent".into(),
                    "InputLocationMessageContent".into(),
                ],
            }
        );
    }

    #[test]
    fn missing_table_is_an_extraction_error() {
        let page = r##"
            <h3><a href="#getting-updates"></a>Getting updates</h3>
            <h4>sendDice</h4>
            <p>Use this method to send a dice.</p>
            <h4>Dice</h4>
            <table><tr><th>Field</th></tr></table>
        "##;
        let err = extract_html(page, &mut Registry::new()).unwrap_err();
        match err {
            ForgeError::Extraction {
                section_name,
                reason,
            } => {
                assert_eq!(section_name, "sendDice");
                assert_eq!(reason, "no parameter table");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parameterless_methods_and_placeholder_models() {
        let page = r##"
            <h3><a href="#getting-updates"></a>Getting updates</h3>
            <h4>logOut</h4>
            <p>Use this method to log out from the cloud Bot API server. Requires no parameters.
            Returns True on success.</p>
            <h4>CallbackGame</h4>
            <p>A placeholder, currently holds no information.</p>
            <h4>Dice</h4>
            <table>
              <tr><th>Field</th><th>Type</th><th>Description</th></tr>
              <tr><td>emoji</td><td>String</td><td>Emoji on which the dice throw animation is based</td></tr>
            </table>
        "##;
        let sections = extract_html(page, &mut Registry::new()).unwrap();

        assert_eq!(sections.len(), 3);
        let RawSection::Method { name, fields, .. } = &sections[0] else {
            panic!("expected a method, got {:?}", sections[0]);
        };
        assert_eq!(name, "logOut");
        assert!(fields.is_empty());
        assert_eq!(
            sections[1],
            RawSection::Model {
                name: "CallbackGame".into(),
                fields: vec![],
            }
        );
        let RawSection::Model { name, fields } = &sections[2] else {
            panic!("expected a model, got {:?}", sections[2]);
        };
        assert_eq!(name, "Dice");
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn generic_without_list_is_an_extraction_error() {
        let page = r##"
            <h3><a href="#getting-updates"></a>Getting updates</h3>
            <h4>InlineQueryResult</h4>
            <p>This object represents one result of an inline query.</p>
        "##;
        match extract_html(page, &mut Registry::new()).unwrap_err() {
            ForgeError::Extraction {
                section_name,
                reason,
            } => {
                assert_eq!(section_name, "InlineQueryResult");
                assert_eq!(reason, "no subtype list");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_rows_are_rejected() {
        let page = r##"
            <h3><a href="#getting-updates"></a>Getting updates</h3>
            <h4>Dice</h4>
            <table><tr><th>Field</th></tr><tr><td>emoji</td><td>String</td></tr></table>
        "##;
        let err = extract_html(page, &mut Registry::new()).unwrap_err();
        assert!(err.to_string().contains("row 1 has 2 cells"));
    }

    #[test]
    fn missing_start_marker() {
        let err = extract_html("<h4>getMe</h4>", &mut Registry::new()).unwrap_err();
        assert!(matches!(err, ForgeError::Extraction { .. }));
    }
}
