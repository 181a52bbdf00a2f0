/// Escapes untrusted text for inclusion in HTML element content or
/// attribute values.
///
/// Unlike `ammonia::clean`, which keeps a whitelist of safe tags, this
/// turns every markup character into an entity, so user posts render as
/// plain text.
pub fn escape(input: &str) -> String {
    ammonia::clean_text(input)
}
