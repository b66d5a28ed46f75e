// crates/caop-core/src/merge.rs
//
// Cross-source enrichment. Later exports are more recent but less
// complete, so every assignment is a fallback chain: a present and
// non-empty secondary value overwrites, anything else leaves the
// existing value alone.

use crate::model::{MunicipalityDetail, ParishDetail};
use crate::raw::{MunicipalityContactsRaw, ParishContactsRaw};
use crate::text::{equals_folded, fold_key, strip_trailing_annotation};

const DISTRICT_PREFIX: &str = "Distrito ";

/// Walk `secondary` and enrich, for each record, the first matching
/// `primary` record only. Identity and ordering of `primary` are
/// preserved. Secondary records with no match are skipped silently;
/// cross-source coverage is partial by design.
pub fn merge_first_match<P, S>(
    primary: &mut [P],
    secondary: &[S],
    matches: impl Fn(&P, &S) -> bool,
    apply: impl Fn(&mut P, &S),
) {
    for record in secondary {
        if let Some(hit) = primary.iter_mut().find(|p| matches(p, record)) {
            apply(hit, record);
        }
    }
}

/// Fallback-chain assignment: overwrite only with a present, non-empty value.
fn fill(dst: &mut Option<String>, src: Option<&str>) {
    if let Some(value) = present(src) {
        *dst = Some(value.to_string());
    }
}

/// A value that actually carries data.
fn present(src: Option<&str>) -> Option<&str> {
    src.filter(|s| !s.is_empty())
}

/// Enrich the 2018 municipality records with the 2021 contact export.
///
/// Records are matched on the folded municipality name. The district is
/// authoritative in the 2021 export (stored without its `"Distrito "`
/// prefix); contacts follow the fallback chain. The phone number may
/// live under either of the export's two field spellings.
pub fn enrich_municipalities(
    primary: &mut [MunicipalityDetail],
    secondary: &[MunicipalityContactsRaw],
) {
    merge_first_match(
        primary,
        secondary,
        |m, c| equals_folded(&c.municipio, &m.name),
        |m, c| {
            let district = c
                .distrito
                .strip_prefix(DISTRICT_PREFIX)
                .unwrap_or(&c.distrito);
            m.district = Some(district.to_string());
            fill(&mut m.email, c.email.as_deref());
            fill(
                &mut m.phone,
                present(c.telefone_padded.as_deref()).or(c.telefone.as_deref()),
            );
            fill(&mut m.website, c.sitio.as_deref());
            // Incidental whitespace in the export; trim after the fallback.
            let mayor = present(c.presidente.as_deref())
                .or(m.mayor.as_deref())
                .unwrap_or("")
                .trim()
                .to_string();
            m.mayor = if mayor.is_empty() { None } else { Some(mayor) };
        },
    );
}

/// Enrich the 2018 parish records with the 2021 contact export.
///
/// The 2021 display name carries a trailing parenthetical annotation
/// that must go before comparison. A record matches when the folded
/// stripped name equals the folded parish name or its folded full name,
/// and the folded municipality names agree.
pub fn enrich_parishes(primary: &mut [ParishDetail], secondary: &[ParishContactsRaw]) {
    merge_first_match(
        primary,
        secondary,
        |p, c| {
            let key = fold_key(&strip_trailing_annotation(&c.nome));
            let name_hit = key == fold_key(&p.name)
                || p
                    .full_name
                    .as_deref()
                    .is_some_and(|full| key == fold_key(full));
            name_hit && equals_folded(&c.municipio, &p.municipality)
        },
        |p, c| {
            fill(&mut p.email, c.email.as_deref());
            fill(&mut p.phone, c.telefone.as_deref());
        },
    );
}
