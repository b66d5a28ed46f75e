// crates/caop-core/src/hierarchy.rs
//
// Joins the geometry features against the merged attribute records and
// assembles the nested country → municipalities → parishes output.

use crate::error::Result;
use crate::model::{Administrations, MunicipalityDetail, MunicipalityParishes, ParishDetail};
use crate::region::Region;
use crate::text::strip_leading_zeros;

/// Scan every region's features, in region order then feature order, and
/// build the aggregate around the merged detail records.
///
/// Per feature:
/// 1. parish name, municipality name and administrative code are
///    extracted from the attribute map; any failure is fatal, since the
///    geometry dataset is either internally consistent or unusable;
/// 2. `"<parish> (<municipality>)"` and the municipality name go onto
///    the flat name lists, duplicates and all ([`finalize`] cleans up);
/// 3. the first detail record whose code matches after leading-zero
///    stripping is back-annotated with the feature's parish spelling; a
///    feature with no counterpart annotates nothing;
/// 4. the parish name is appended to every hierarchy entry with this
///    municipality name (exactly one as long as names stay unique), or
///    a new entry is created.
pub fn build_administrations(
    regions: &[Region],
    parishes: Vec<ParishDetail>,
    municipalities: Vec<MunicipalityDetail>,
) -> Result<Administrations> {
    let mut admin = Administrations {
        parishes_details: parishes,
        municipalities_details: municipalities,
        ..Default::default()
    };

    for region in regions {
        for feature in &region.features {
            let municipality = feature.municipality_name()?;
            let parish = feature.parish_name()?;
            let code = feature.admin_code()?;

            admin
                .list_of_parishes_names
                .push(format!("{parish} ({municipality})"));
            admin
                .list_of_municipalities_names
                .push(municipality.to_string());

            let code_key = strip_leading_zeros(code);
            if let Some(detail) = admin
                .parishes_details
                .iter_mut()
                .find(|p| strip_leading_zeros(&p.code) == code_key)
            {
                detail.geometry_name = Some(parish.to_string());
            }

            if admin
                .list_of_municipalities_with_parishes
                .iter()
                .any(|entry| entry.name == municipality)
            {
                for entry in admin
                    .list_of_municipalities_with_parishes
                    .iter_mut()
                    .filter(|entry| entry.name == municipality)
                {
                    entry.parishes.push(parish.to_string());
                }
            } else {
                admin
                    .list_of_municipalities_with_parishes
                    .push(MunicipalityParishes {
                        name: municipality.to_string(),
                        parishes: vec![parish.to_string()],
                    });
            }
        }
        tracing::debug!(region = %region.key, "hierarchy pass complete");
    }

    Ok(admin)
}

/// Deduplicate and sort every output list. Idempotent; display forms are
/// preserved, only the entry sort key is upper-cased.
pub fn finalize(admin: &mut Administrations) {
    admin.list_of_parishes_names.sort_unstable();
    admin.list_of_parishes_names.dedup();

    admin.list_of_municipalities_names.sort_unstable();
    admin.list_of_municipalities_names.dedup();

    let entries = std::mem::take(&mut admin.list_of_municipalities_with_parishes);
    // Full-field equality dedup, first occurrence kept. Entries are
    // distinct by construction, so this is expected to remove nothing.
    let mut entries = dedup_preserving_order(entries);
    entries.sort_by(|a, b| a.name.to_uppercase().cmp(&b.name.to_uppercase()));
    for entry in &mut entries {
        entry.parishes.sort_unstable();
        entry.parishes.dedup();
    }
    admin.list_of_municipalities_with_parishes = entries;
}

fn dedup_preserving_order<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
