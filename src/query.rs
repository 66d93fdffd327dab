/// Join the search tags into the query string sent to the search service.
pub fn build_query<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
