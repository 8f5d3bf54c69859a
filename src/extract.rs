//! Turns the stratagem code page into records.
//!
//! Each `table.wikitable` is one group; each body row with at least three `td`
//! cells is one record. Tables and rows that don't fit are logged as [`Skip`]s
//! and extraction carries on with the next one.

use crate::sanitize::sanitize_filename;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_IMAGE: &str = "unknown.png";
const MIN_CELLS: usize = 3;
const IMAGE_NAME: &str = "data-image-name";

static DIRECTIONS: Lazy<HashMap<&'static str, char>> = Lazy::new(|| {
    [
        ("Up Arrow.png", 'U'),
        ("Left Arrow.png", 'L'),
        ("Down Arrow.png", 'D'),
        ("Right Arrow.png", 'R'),
    ]
    .into_iter()
    .collect()
});
static BORDERS: Lazy<HashMap<&'static str, Border>> = Lazy::new(|| {
    [
        ("Offensive", Border::Red),
        ("Supply", Border::Blue),
        ("Defensive", Border::Green),
        ("Mission", Border::Gold),
    ]
    .into_iter()
    .collect()
});

fn sel(selector: &str) -> Selector {
    Selector::parse(selector).expect("static selector")
}
static TABLES: Lazy<Selector> = Lazy::new(|| sel("table.wikitable"));
static HEADER: Lazy<Selector> = Lazy::new(|| sel(r#"th[colspan="6"]"#));
static STYLED: Lazy<Selector> = Lazy::new(|| sel("span[style]"));
static ROWS: Lazy<Selector> = Lazy::new(|| sel("tbody tr"));
static CELLS: Lazy<Selector> = Lazy::new(|| sel("td"));
static LINK: Lazy<Selector> = Lazy::new(|| sel("a"));
static IMAGES: Lazy<Selector> = Lazy::new(|| sel("img"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Border {
    Red,
    Blue,
    Green,
    Gold,
    Unknown,
}
impl Border {
    pub fn for_group(group: &str) -> Border {
        BORDERS.get(group).copied().unwrap_or(Border::Unknown)
    }
}

/// Where the row's icon lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    /// Base64 `data:image` URL; nothing to download.
    Inline,
    Unsupported(String),
    Missing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub group: String,
    pub name: String,
    pub input_code: String,
    pub image_filename: String,
    pub border: Border,
    pub image: ImageSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skip {
    NoTables,
    /// Index of the table among all `table.wikitable` elements.
    UnnamedGroup { table: usize },
    NoRows { group: String },
    ShortRow { group: String, row: usize, cells: usize },
}
impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Skip::NoTables => write!(f, "No tables with the specified class found"),
            Skip::UnnamedGroup { table } => {
                write!(f, "No group name found for table {}, skipping", table)
            }
            Skip::NoRows { group } => write!(f, "No rows found in group: {}", group),
            Skip::ShortRow { group, row, cells } => write!(
                f,
                "Skipping row {} in group {} with insufficient columns ({} < {})",
                row, group, cells, MIN_CELLS
            ),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub skips: Vec<Skip>,
}
impl Extraction {
    fn skip(&mut self, skip: Skip) {
        warn!("{}", skip);
        self.skips.push(skip);
    }
}

/// Fields of one accepted row, before an id is handed out.
struct Row {
    name: String,
    input_code: String,
    image_filename: String,
    image: ImageSource,
}

pub fn extract(html: &str) -> Extraction {
    let document = Html::parse_document(html);
    let mut extraction = Extraction::default();
    let tables: Vec<ElementRef> = document.select(&TABLES).collect();
    if tables.is_empty() {
        extraction.skip(Skip::NoTables);
        return extraction;
    }
    let mut next_id = 1;
    for (index, table) in tables.into_iter().enumerate() {
        let (group, rows) = match read_group(table, index) {
            Ok(group) => group,
            Err(skip) => {
                extraction.skip(skip);
                continue;
            }
        };
        let border = Border::for_group(&group);
        for (position, row) in rows.into_iter().enumerate() {
            let row = match read_row(row, &group, position) {
                Ok(row) => row,
                Err(skip) => {
                    extraction.skip(skip);
                    continue;
                }
            };
            extraction.records.push(Record {
                id: next_id,
                group: group.clone(),
                name: row.name,
                input_code: row.input_code,
                image_filename: row.image_filename,
                border,
                image: row.image,
            });
            next_id += 1;
        }
    }
    extraction
}

fn text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Group name is everything before the first colon of the display name.
pub fn group_name(display: &str) -> &str {
    display.split_once(':').map_or(display, |(head, _)| head)
}

fn read_group(table: ElementRef, index: usize) -> Result<(String, Vec<ElementRef>), Skip> {
    let display = table
        .select(&HEADER)
        .next()
        .or_else(|| table.select(&STYLED).next())
        .map(text)
        .ok_or(Skip::UnnamedGroup { table: index })?;
    let group = group_name(&display).to_owned();
    info!("Processing group: {}", group);
    let rows: Vec<ElementRef> = table.select(&ROWS).collect();
    if rows.is_empty() {
        return Err(Skip::NoRows { group });
    }
    Ok((group, rows))
}

fn read_row(row: ElementRef, group: &str, position: usize) -> Result<Row, Skip> {
    let cells: Vec<ElementRef> = row.select(&CELLS).collect();
    if cells.len() < MIN_CELLS {
        return Err(Skip::ShortRow { group: group.to_owned(), row: position, cells: cells.len() });
    }
    let name = cells[1].select(&LINK).next().map(text).unwrap_or_else(|| UNKNOWN_NAME.to_owned());
    info!("Found stratagem: {}", name);
    let input_code = input_code(cells[2]).unwrap_or_else(|| {
        warn!("No input code images found for stratagem: {}", name);
        "?".to_owned()
    });
    info!("Input code for {}: {}", name, input_code);
    let (image_filename, image) = image_source(cells[0]);
    info!("Image filename for {}: {}", name, image_filename);
    Ok(Row { name, input_code, image_filename, image })
}

/// `None` when the cell holds no images at all. Images without a name add nothing;
/// named but unmapped ones add `?`.
fn input_code(cell: ElementRef) -> Option<String> {
    let icons: Vec<ElementRef> = cell.select(&IMAGES).collect();
    if icons.is_empty() {
        return None;
    }
    let code = icons
        .into_iter()
        .filter_map(|icon| icon.value().attr(IMAGE_NAME))
        .filter(|name| !name.is_empty())
        .map(|name| DIRECTIONS.get(name).copied().unwrap_or('?'))
        .collect();
    Some(code)
}

fn image_source(cell: ElementRef) -> (String, ImageSource) {
    let named = cell
        .select(&IMAGES)
        .next()
        .map(|img| img.value())
        .and_then(|img| img.attr(IMAGE_NAME).map(|name| (img, name)));
    let (image, name) = match named {
        Some(named) => named,
        None => return (UNKNOWN_IMAGE.to_owned(), ImageSource::Missing),
    };
    let url = image.attr("data-src").or_else(|| image.attr("src")).unwrap_or("");
    let source = if url.starts_with("http") {
        ImageSource::Remote(url.to_owned())
    } else if url.starts_with("data:image") {
        ImageSource::Inline
    } else {
        ImageSource::Unsupported(url.to_owned())
    };
    (sanitize_filename(name), source)
}
