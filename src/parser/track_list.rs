use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::schema::{DistanceKm, TrackEntry};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static ROW: Lazy<Selector> = Lazy::new(|| selector("table.flights > tbody > tr"));
static PILOT: Lazy<Selector> = Lazy::new(|| selector("td.list-pilot a"));
static DISTANCE: Lazy<Selector> = Lazy::new(|| selector("td.list-km strong"));
static GLIDER: Lazy<Selector> = Lazy::new(|| selector("td.list-glider span[title]"));
static TAKEOFF: Lazy<Selector> = Lazy::new(|| selector("td.list-takeoff a"));
static IGC_LINK: Lazy<Selector> = Lazy::new(|| selector(r#"a[href$=".igc"]"#));
static DISTANCE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?) km$").unwrap());

pub fn parse(html: &Html, base_url: &Url) -> anyhow::Result<Vec<TrackEntry>> {
    html.select(&ROW)
        .enumerate()
        .map(|(index, row)| {
            parse_row(row, base_url).with_context(|| format!("While parsing row {}", index + 1))
        })
        .collect()
}

fn parse_row(row: ElementRef, base_url: &Url) -> anyhow::Result<TrackEntry> {
    let pilot_name = text_of(row, &PILOT).context("Pilot cell not found")?;
    let distance =
        parse_distance(&text_of(row, &DISTANCE).context("Distance cell not found")?)?;
    let activity = row
        .select(&GLIDER)
        .next()
        .and_then(|span| span.value().attr("title"))
        .context("Glider category not found")?;
    let area = text_of(row, &TAKEOFF);
    let igc_href = row
        .select(&IGC_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .context("IGC link not found")?;
    let igc_url = base_url
        .join(igc_href)
        .with_context(|| format!("Invalid IGC link: {igc_href:?}"))?;
    Ok(TrackEntry::builder()
        .pilot_name(pilot_name.into())
        .distance(distance)
        .activity(activity.to_owned().into())
        .area(area.map(Into::into))
        .igc_url(igc_url)
        .build())
}

fn text_of(element: ElementRef, selector: &Selector) -> Option<String> {
    let text = element
        .select(selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_owned();
    (!text.is_empty()).then_some(text)
}

fn parse_distance(text: &str) -> anyhow::Result<DistanceKm> {
    let captures = DISTANCE_FORMAT
        .captures(text)
        .with_context(|| format!("Unexpected distance format: {text:?}"))?;
    Ok(captures[1]
        .parse::<f64>()
        .with_context(|| format!("Unexpected distance value: {text:?}"))?
        .into())
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use scraper::Html;
    use url::Url;

    use super::parse;
    use crate::api::DEFAULT_LIST_URL;

    const LISTING: &str = r#"
        <html><body>
        <table class="flights">
          <thead><tr><th>No.</th><th>Pilot</th></tr></thead>
          <tbody>
            <tr>
              <td class="list-no">1.</td>
              <td class="list-pilot"><a href="/pilots/hken">Hken</a></td>
              <td class="list-takeoff"><a href="/areas/asagiri">Asagiri_Shizuoka</a></td>
              <td class="list-glider"><span class="cat-P" title="Paraglider">P</span></td>
              <td class="list-km"><strong>12.34 km</strong></td>
              <td class="list-actions"><a href="/tracks/2023-05-01/Hken.igc">IGC</a></td>
            </tr>
            <tr>
              <td class="list-no">2.</td>
              <td class="list-pilot"><a href="/pilots/kenzaki">Kenzaki</a></td>
              <td class="list-takeoff"></td>
              <td class="list-glider"><span class="cat-H" title="Flex wing FAI1">H</span></td>
              <td class="list-km"><strong>101.5 km</strong></td>
              <td class="list-actions"><a href="https://tracks.example.com/Kenzaki.igc">IGC</a></td>
            </tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn parses_listing_rows() {
        let html = Html::parse_document(LISTING);
        let base_url = Url::parse(DEFAULT_LIST_URL).unwrap();
        let entries = parse(&html, &base_url).unwrap();
        assert_eq!(entries.len(), 2);

        let (first, second) = entries.iter().collect_tuple().unwrap();
        assert_eq!(first.pilot_name().as_str(), "Hken");
        assert_eq!(first.distance().get(), 12.34);
        assert_eq!(first.activity().to_string(), "Paraglider");
        assert_eq!(
            first.area().as_ref().map(ToString::to_string).as_deref(),
            Some("Asagiri_Shizuoka")
        );
        assert_eq!(
            first.igc_url().as_str(),
            "https://www.xcontest.org/tracks/2023-05-01/Hken.igc"
        );

        assert_eq!(second.pilot_name().as_str(), "Kenzaki");
        assert_eq!(second.activity().to_string(), "Flex wing FAI1");
        assert!(second.area().is_none());
        assert_eq!(
            second.igc_url().as_str(),
            "https://tracks.example.com/Kenzaki.igc"
        );
    }

    #[test]
    fn page_without_listing_yields_no_entries() {
        let html = Html::parse_document("<html><body><p>No flights.</p></body></html>");
        let base_url = Url::parse(DEFAULT_LIST_URL).unwrap();
        assert!(parse(&html, &base_url).unwrap().is_empty());
    }

    #[test]
    fn row_with_missing_distance_is_an_error() {
        let html = Html::parse_document(
            r#"
            <table class="flights"><tbody><tr>
              <td class="list-pilot"><a href="/pilots/hken">Hken</a></td>
              <td class="list-glider"><span title="Paraglider">P</span></td>
              <td class="list-actions"><a href="/t.igc">IGC</a></td>
            </tr></tbody></table>
            "#,
        );
        let base_url = Url::parse(DEFAULT_LIST_URL).unwrap();
        let error = parse(&html, &base_url).unwrap_err();
        assert!(format!("{error:#}").contains("Distance cell not found"));
    }
}
