use super::{
    context::{ParseContext, ParseEnv},
    grouper::group_parens,
    matcher::parse_group,
};
use crate::domain::{Collection, Requirement};

/// Parses one sentence of requisite text.
///
/// Paren groups are parsed first, innermost first, so that each back-reference
/// is resolved by the time the text containing it is parsed.
#[must_use]
pub fn parse_chunk(chunk: &str, env: ParseEnv<'_>) -> Requirement {
    let chunk = chunk.trim();
    if chunk.is_empty() {
        return Requirement::Throwaway;
    }
    let (text, groups) = group_parens(chunk);
    let mut context = ParseContext::new(env, groups);
    for index in 0..context.group_count() {
        let Some(group) = context.group_text(index).map(ToString::to_string) else {
            continue;
        };
        let requirement = parse_group(&group, &mut context);
        context.store(index, requirement);
    }
    parse_group(&text, &mut context)
}

/// Parses the text of one requisite category.
///
/// The text is split into sentences on `". "`, each sentence is parsed on its
/// own and throwaways are dropped. Returns `None` if nothing survives.
#[must_use]
pub fn parse_requisite_text(text: &str, env: ParseEnv<'_>) -> Option<Collection> {
    let options: Vec<_> = text
        .trim()
        .split(". ")
        .map(|sentence| sentence.trim().trim_end_matches('.').trim())
        .map(|sentence| parse_chunk(sentence, env))
        .filter(|requirement| !requirement.is_throwaway())
        .collect();
    if options.is_empty() {
        None
    } else {
        Some(Collection::requisites(options))
    }
}
