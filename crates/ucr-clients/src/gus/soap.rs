//! SOAP envelope construction and response parsing for the GUS BIR service.
//!
//! GUS's own BIR API wraps its real payload as a string field inside the
//! SOAP body — the field's *text* is itself an escaped XML document. Parsing
//! a GUS response is therefore two passes: unwrap the SOAP envelope to get
//! the inner XML string, then parse that string as XML in its own right.

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;
use ucr_schemas::{ErrorKind, TypedError, UpstreamSource};

const NS: &str = "http://CIS/BIR/PUBL/2014/07";

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn build_zaloguj_envelope(user_key: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns="{NS}">
  <soap:Body>
    <ns:Zaloguj>
      <ns:pKluczUzytkownika>{key}</ns:pKluczUzytkownika>
    </ns:Zaloguj>
  </soap:Body>
</soap:Envelope>"#,
        key = escape_xml(user_key)
    )
}

pub fn build_dane_szukaj_podmioty_envelope(session_id: &str, nip: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns="{NS}">
  <soap:Header>
    <ns:sid>{sid}</ns:sid>
  </soap:Header>
  <soap:Body>
    <ns:DaneSzukajPodmioty>
      <ns:pParametryWyszukiwania>
        <ns:Nip>{nip}</ns:Nip>
      </ns:pParametryWyszukiwania>
    </ns:DaneSzukajPodmioty>
  </soap:Body>
</soap:Envelope>"#,
        sid = escape_xml(session_id),
        nip = escape_xml(nip)
    )
}

pub fn build_dane_pobierz_pelny_raport_envelope(
    session_id: &str,
    regon: &str,
    report_name: &str,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns="{NS}">
  <soap:Header>
    <ns:sid>{sid}</ns:sid>
  </soap:Header>
  <soap:Body>
    <ns:DanePobierzPelnyRaport>
      <ns:pRegon>{regon}</ns:pRegon>
      <ns:pNazwaRaportu>{report}</ns:pNazwaRaportu>
    </ns:DanePobierzPelnyRaport>
  </soap:Body>
</soap:Envelope>"#,
        sid = escape_xml(session_id),
        regon = escape_xml(regon),
        report = escape_xml(report_name)
    )
}

/// Extract the text of the first element with the given local name.
/// Returns `MalformedResponse` if absent or unreadable.
fn extract_element_text(xml: &str, local_name: &str) -> Result<String, TypedError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut in_target = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == local_name.as_bytes() => {
                in_target = true;
            }
            Ok(Event::Text(t)) if in_target => {
                let text = t
                    .unescape()
                    .map_err(|e| malformed(format!("xml unescape failed: {e}")))?
                    .into_owned();
                return Ok(text);
            }
            Ok(Event::CData(t)) if in_target => {
                let text = String::from_utf8_lossy(t.as_ref()).into_owned();
                return Ok(text);
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == local_name.as_bytes() && in_target => {
                // Element closed with no text content — empty string.
                return Ok(String::new());
            }
            Ok(Event::Eof) => {
                return Err(malformed(format!(
                    "element '{local_name}' not found in response"
                )))
            }
            Err(e) => return Err(malformed(format!("xml parse error: {e}"))),
            _ => {}
        }
        buf.clear();
    }
}

fn malformed(message: impl Into<String>) -> TypedError {
    TypedError::new(UpstreamSource::Gus, ErrorKind::MalformedResponse, message)
}

/// Detect `kod=2`/`kod=7` embedded in a GUS SOAP fault string — the
/// documented last-resort fallback for session-expiry detection when no
/// structured signal is available (spec.md §4.1).
pub fn fault_implies_session_expired(fault_string: &str) -> bool {
    fault_string.contains("kod=2") || fault_string.contains("kod=7")
}

pub fn extract_soap_fault_string(xml: &str) -> Option<String> {
    extract_element_text(xml, "faultstring").ok()
}

pub fn parse_zaloguj_response(body: &str) -> Result<String, TypedError> {
    let sid = extract_element_text(body, "ZalogujResult")?;
    if sid.trim().is_empty() {
        return Err(malformed("GUS login returned an empty session id"));
    }
    Ok(sid)
}

pub fn parse_dane_szukaj_podmioty_response(body: &str) -> Result<Vec<BTreeMap<String, String>>, TypedError> {
    let inner = extract_element_text(body, "DaneSzukajPodmiotyResult")?;
    parse_flat_rows(&inner, "dane")
}

pub fn parse_dane_pobierz_pelny_raport_response(
    body: &str,
) -> Result<Vec<BTreeMap<String, String>>, TypedError> {
    let inner = extract_element_text(body, "DanePobierzPelnyRaportResult")?;
    parse_flat_rows(&inner, "dane")
}

/// Parse an inner GUS XML document into flat field maps, one per `<dane>`
/// (or caller-specified row tag) element encountered.
fn parse_flat_rows(xml: &str, row_tag: &str) -> Result<Vec<BTreeMap<String, String>>, TypedError> {
    if xml.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut rows = Vec::new();
    let mut current: Option<BTreeMap<String, String>> = None;
    let mut current_field: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == row_tag {
                    current = Some(BTreeMap::new());
                } else if current.is_some() {
                    current_field = Some(name);
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(row), Some(field)) = (current.as_mut(), current_field.as_ref()) {
                    let text = t
                        .unescape()
                        .map_err(|e| malformed(format!("xml unescape failed: {e}")))?
                        .into_owned();
                    row.insert(field.clone(), text);
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == row_tag {
                    if let Some(row) = current.take() {
                        rows.push(row);
                    }
                } else if current_field.as_deref() == Some(name.as_str()) {
                    current_field = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(format!("xml parse error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zaloguj_session_id() {
        let body = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
            <soap:Body><ZalogujResponse><ZalogujResult>abc123sid</ZalogujResult></ZalogujResponse></soap:Body>
        </soap:Envelope>"#;
        assert_eq!(parse_zaloguj_response(body).unwrap(), "abc123sid");
    }

    #[test]
    fn empty_session_id_is_malformed() {
        let body = r#"<soap:Envelope><soap:Body><ZalogujResponse><ZalogujResult></ZalogujResult></ZalogujResponse></soap:Body></soap:Envelope>"#;
        let err = parse_zaloguj_response(body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
    }

    #[test]
    fn parses_nested_dane_rows_from_escaped_inner_document() {
        let inner = "<root><dane><Regon>123456789</Regon><Nazwa>Example Sp. z o.o.</Nazwa><SilosID>6</SilosID></dane></root>";
        let escaped = escape_xml(inner);
        let body = format!(
            r#"<soap:Envelope><soap:Body><DaneSzukajPodmiotyResponse><DaneSzukajPodmiotyResult>{escaped}</DaneSzukajPodmiotyResult></DaneSzukajPodmiotyResponse></soap:Body></soap:Envelope>"#
        );
        let rows = parse_dane_szukaj_podmioty_response(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Regon").map(String::as_str), Some("123456789"));
        assert_eq!(rows[0].get("SilosID").map(String::as_str), Some("6"));
    }

    #[test]
    fn fault_string_detects_session_expiry_codes() {
        assert!(fault_implies_session_expired("Blad: kod=2 sesja wygasla"));
        assert!(fault_implies_session_expired("kod=7"));
        assert!(!fault_implies_session_expired("kod=99 unknown error"));
    }

    #[test]
    fn missing_result_element_is_malformed_response() {
        let body = "<soap:Envelope><soap:Body></soap:Body></soap:Envelope>";
        let err = parse_zaloguj_response(body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedResponse);
    }
}
