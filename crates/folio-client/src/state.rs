//! Portfolio state holder.

use crate::client::ContentClient;
use crate::error::Result;
use folio_filter::{available_years, filter_publications, FilterCriteria, TypeFilter, YearFilter};
use folio_model::{sort_news_for_display, News, Profile, Publication};

/// Fetched content plus the current filter selection.
///
/// `visible` and `years` are derived values. They are recomputed on every
/// setter that changes one of their inputs and never otherwise.
#[derive(Debug, Clone, Default)]
pub struct PortfolioState {
    profile: Option<Profile>,
    publications: Vec<Publication>,
    news: Vec<News>,
    criteria: FilterCriteria,
    visible: Vec<Publication>,
    years: Vec<i32>,
}

impl PortfolioState {
    /// Empty state: no profile yet, no content, unfiltered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch everything once through `client`.
    ///
    /// An unseeded profile leaves the placeholder state in place instead of failing.
    pub async fn load<C: ContentClient + ?Sized>(client: &C) -> Result<Self> {
        let mut state = Self::new();
        state.refresh(client).await?;
        Ok(state)
    }

    /// Re-fetch profile, publications and news, keeping the current criteria.
    pub async fn refresh<C: ContentClient + ?Sized>(&mut self, client: &C) -> Result<()> {
        let profile = match client.fetch_profile().await {
            Ok(profile) => Some(profile),
            Err(e) if e.is_not_found() => {
                tracing::warn!("No profile available yet; showing placeholder");
                None
            }
            Err(e) => return Err(e),
        };
        let publications = client.fetch_publications().await?;
        let news = client.fetch_news().await?;

        self.profile = profile;
        self.set_news(news);
        self.set_publications(publications);
        Ok(())
    }

    // --- Inputs ---

    pub fn set_profile(&mut self, profile: Option<Profile>) {
        self.profile = profile;
    }

    /// Replace the collection; recomputes the year list and the visible subset.
    pub fn set_publications(&mut self, publications: Vec<Publication>) {
        self.publications = publications;
        self.years = available_years(&self.publications);
        self.recompute();
    }

    pub fn set_news(&mut self, mut news: Vec<News>) {
        sort_news_for_display(&mut news);
        self.news = news;
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if self.criteria != criteria {
            self.criteria = criteria;
            self.recompute();
        }
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        let criteria = self.criteria.clone().with_search_term(search_term);
        self.set_criteria(criteria);
    }

    /// Set the year selector from its raw value (`"all"` or a year).
    pub fn set_year_filter(&mut self, year: &str) {
        let criteria = self.criteria.clone().with_year(YearFilter::parse(year));
        self.set_criteria(criteria);
    }

    /// Set the type selector from its raw value (`"all"` or a type wire name).
    pub fn set_type_filter(&mut self, kind: &str) {
        let criteria = self.criteria.clone().with_type(TypeFilter::parse(kind));
        self.set_criteria(criteria);
    }

    /// Back to the unfiltered view.
    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    fn recompute(&mut self) {
        self.visible = filter_publications(&self.publications, &self.criteria);
    }

    // --- Outputs ---

    /// The profile, or `None` while it is unavailable (render a placeholder).
    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.profile.is_none()
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    /// News, newest first.
    pub fn news(&self) -> &[News] {
        &self.news
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Publications passing the current criteria.
    pub fn visible(&self) -> &[Publication] {
        &self.visible
    }

    /// Distinct years of the full collection, newest first.
    pub fn available_years(&self) -> &[i32] {
        &self.years
    }
}
