//! Multi-tier place-name resolution.
//!
//! Tiers run in a fixed order and the first hit wins: the static country
//! index, then states (name or postal code), cities, and urban areas by
//! prefix. Later tiers are only queried when earlier ones miss.

use std::sync::Arc;

use tracing::debug;

use super::CountryIndex;
use super::Region;
use super::ports::{ReferenceRegionRepository, ReferenceRegionRepositoryError};

/// Resolves one free-text name to at most one region.
#[derive(Clone)]
pub struct LocationResolver<R> {
    countries: Arc<CountryIndex>,
    regions: Arc<R>,
}

impl<R> LocationResolver<R> {
    /// Create a resolver over the loaded country index and reference tables.
    pub fn new(countries: Arc<CountryIndex>, regions: Arc<R>) -> Self {
        Self { countries, regions }
    }
}

impl<R> LocationResolver<R>
where
    R: ReferenceRegionRepository,
{
    /// Resolve `name`, returning `Ok(None)` when no tier matches.
    ///
    /// A database failure in any tier aborts the chain for this name.
    pub async fn resolve(
        &self,
        name: &str,
    ) -> Result<Option<Region>, ReferenceRegionRepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        if let Some(country) = self.countries.find(name) {
            debug!(name, resolved = %country.name, "resolved location as country");
            return Ok(Some(country.clone()));
        }
        if let Some(state) = self.regions.find_state(name).await? {
            return Ok(Some(state));
        }
        if let Some(city) = self.regions.find_city(name).await? {
            return Ok(Some(city));
        }
        self.regions.find_urban_area_by_prefix(name).await
    }
}

#[cfg(test)]
mod tests {
    use geojson::{Feature, Geometry, Value};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::MockReferenceRegionRepository;
    use crate::domain::{RegionId, RegionLevel};

    fn countries() -> Arc<CountryIndex> {
        let serde_json::Value::Object(properties) =
            json!({"ADMIN": "Georgia", "ISO_A2": "GE", "ISO_A3": "GEO"})
        else {
            panic!("object literal");
        };
        Arc::new(CountryIndex::from_features(vec![Feature {
            geometry: Some(Geometry::new(Value::Point(vec![43.4, 42.3]))),
            properties: Some(properties),
            ..Feature::default()
        }]))
    }

    fn region(name: &str, level: RegionLevel) -> Region {
        Region {
            id: RegionId::Number(1),
            name: name.to_owned(),
            code: None,
            level,
            geometry: Geometry::new(Value::Point(vec![0.0, 0.0])),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn country_tier_wins_without_touching_database() {
        let mut repo = MockReferenceRegionRepository::new();
        repo.expect_find_state().times(0);
        repo.expect_find_city().times(0);
        repo.expect_find_urban_area_by_prefix().times(0);

        let resolver = LocationResolver::new(countries(), Arc::new(repo));
        let found = resolver
            .resolve("georgia")
            .await
            .expect("resolution succeeds")
            .expect("country match");

        assert_eq!(found.level, RegionLevel::Country);
        assert_eq!(found.name, "Georgia");
    }

    #[rstest]
    #[tokio::test]
    async fn falls_through_to_city_tier() {
        let mut repo = MockReferenceRegionRepository::new();
        repo.expect_find_state()
            .with(eq("Austin"))
            .times(1)
            .return_once(|_| Ok(None));
        repo.expect_find_city()
            .with(eq("Austin"))
            .times(1)
            .return_once(|_| Ok(Some(region("Austin", RegionLevel::City))));
        repo.expect_find_urban_area_by_prefix().times(0);

        let resolver = LocationResolver::new(countries(), Arc::new(repo));
        let found = resolver
            .resolve(" Austin ")
            .await
            .expect("resolution succeeds")
            .expect("city match");

        assert_eq!(found.level, RegionLevel::City);
    }

    #[rstest]
    #[tokio::test]
    async fn urban_area_is_last_resort() {
        let mut repo = MockReferenceRegionRepository::new();
        repo.expect_find_state().return_once(|_| Ok(None));
        repo.expect_find_city().return_once(|_| Ok(None));
        repo.expect_find_urban_area_by_prefix()
            .with(eq("Dallas"))
            .return_once(|_| {
                Ok(Some(region(
                    "Dallas--Fort Worth--Arlington, TX",
                    RegionLevel::UrbanArea,
                )))
            });

        let resolver = LocationResolver::new(countries(), Arc::new(repo));
        let found = resolver.resolve("Dallas").await.expect("ok").expect("match");

        assert_eq!(found.level, RegionLevel::UrbanArea);
    }

    #[rstest]
    #[tokio::test]
    async fn database_error_stops_the_chain() {
        let mut repo = MockReferenceRegionRepository::new();
        repo.expect_find_state()
            .return_once(|_| Err(ReferenceRegionRepositoryError::query("timeout")));
        repo.expect_find_city().times(0);

        let resolver = LocationResolver::new(countries(), Arc::new(repo));
        let err = resolver.resolve("Texas").await.expect_err("query fails");

        assert!(err.to_string().contains("timeout"));
    }

    #[rstest]
    #[tokio::test]
    async fn blank_name_resolves_to_nothing() {
        let repo = MockReferenceRegionRepository::new();
        let resolver = LocationResolver::new(countries(), Arc::new(repo));
        assert!(resolver.resolve("   ").await.expect("ok").is_none());
    }
}
