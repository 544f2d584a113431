//! KML 2.2 export of the warehouses that currently have stock.

use std::io::{Cursor, Write};

use chrono::NaiveDate;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use stockmap_core::Warehouse;

use crate::styles::{MarkerStyle, StyleTable};
use crate::ExportError;

/// MIME type of the exported document.
pub const KML_MIME_TYPE: &str = "application/vnd.google-earth.kml+xml";

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const FILE_PREFIX: &str = "warehouse-inventory";

/// Download name for an export made on `date`, e.g.
/// `warehouse-inventory-2026-10-19.kml`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}-{}.kml", date.format("%Y-%m-%d"))
}

/// Serialize the in-stock and low-stock warehouses into a KML document.
///
/// Returns `Ok(None)` when no warehouse qualifies; out-of-stock warehouses
/// are omitted entirely.
///
/// # Errors
///
/// Returns [`ExportError::Xml`] if the XML writer fails.
pub fn generate_kml(
    warehouses: &[Warehouse],
    styles: &StyleTable,
) -> Result<Option<String>, ExportError> {
    let placemarks: Vec<(&Warehouse, &MarkerStyle)> = warehouses
        .iter()
        .filter_map(|w| styles.for_status(w.inventory_status).map(|s| (w, s)))
        .collect();

    if placemarks.is_empty() {
        return Ok(None);
    }

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    emit(&mut writer, Event::Start(kml))?;
    emit(&mut writer, Event::Start(BytesStart::new("Document")))?;
    text_element(&mut writer, "name", "Warehouse Inventory")?;

    write_style(&mut writer, &styles.in_stock)?;
    write_style(&mut writer, &styles.low_stock)?;

    for (warehouse, style) in &placemarks {
        write_placemark(&mut writer, warehouse, style)?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("Document")))?;
    emit(&mut writer, Event::End(BytesEnd::new("kml")))?;

    let bytes = writer.into_inner().into_inner();
    let document = String::from_utf8(bytes).map_err(|e| ExportError::Xml(e.to_string()))?;

    tracing::info!(
        placemarks = placemarks.len(),
        bytes = document.len(),
        "generated KML export"
    );
    Ok(Some(document))
}

fn write_style<W: Write>(writer: &mut Writer<W>, style: &MarkerStyle) -> Result<(), ExportError> {
    let mut start = BytesStart::new("Style");
    start.push_attribute(("id", style.id.as_str()));
    emit(writer, Event::Start(start))?;
    emit(writer, Event::Start(BytesStart::new("IconStyle")))?;
    text_element(writer, "color", &style.color)?;
    text_element(writer, "scale", &style.scale.to_string())?;
    emit(writer, Event::Start(BytesStart::new("Icon")))?;
    text_element(writer, "href", &style.icon_href)?;
    emit(writer, Event::End(BytesEnd::new("Icon")))?;
    emit(writer, Event::End(BytesEnd::new("IconStyle")))?;
    emit(writer, Event::End(BytesEnd::new("Style")))
}

fn write_placemark<W: Write>(
    writer: &mut Writer<W>,
    warehouse: &Warehouse,
    style: &MarkerStyle,
) -> Result<(), ExportError> {
    emit(writer, Event::Start(BytesStart::new("Placemark")))?;
    text_element(writer, "name", &warehouse.name)?;
    text_element(writer, "styleUrl", &format!("#{}", style.id))?;
    text_element(writer, "description", &placemark_description(warehouse))?;
    emit(writer, Event::Start(BytesStart::new("Point")))?;
    text_element(
        writer,
        "coordinates",
        &format!(
            "{},{},0",
            warehouse.coordinates.longitude, warehouse.coordinates.latitude
        ),
    )?;
    emit(writer, Event::End(BytesEnd::new("Point")))?;
    emit(writer, Event::End(BytesEnd::new("Placemark")))
}

/// HTML balloon text. Values are HTML-escaped here and XML-escaped again by
/// the writer, so viewers decode it back to markup.
fn placemark_description(warehouse: &Warehouse) -> String {
    let mut html = format!(
        "<p><strong>Status:</strong> {}</p>",
        warehouse.inventory_status.label()
    );
    if let Some(phone) = warehouse.display_phone() {
        html.push_str(&format!("<p><strong>Phone:</strong> {}</p>", escape(phone)));
    }
    html.push_str(&format!(
        "<p><strong>Products ({}):</strong></p><ul>",
        warehouse.products.len()
    ));
    for product in &warehouse.products {
        html.push_str(&format!(
            "<li>{} (Item #{}): {}</li>",
            escape(product.name.as_str()),
            escape(product.item_number.as_str()),
            product.stock_status.label()
        ));
    }
    html.push_str("</ul>");
    html
}

fn text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), ExportError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), ExportError> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::Xml(e.to_string()))
}

#[cfg(test)]
#[path = "kml_test.rs"]
mod tests;
