// Markup-to-plaintext rewrite pipeline.
//
// The output uses `\r` as the line/paragraph break character and `\t` to
// approximate table cells; the console renderer downstream understands both.
// The stages run in a fixed order and each one operates on the output of the
// previous one, so the order is part of the contract.

use crate::entities::lookup_entity;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_SPACE_RUNS: Regex = Regex::new(r"( )+").unwrap();

    // Opaque blocks: normalize the tags to a bare token, then drop everything
    // between the tokens. `.` does not cross `\n`, so a block whose open and
    // close tags sit on different lines is only partially removed.
    static ref RE_HEAD_OPEN: Regex = Regex::new(r"<( )*head([^>])*>").unwrap();
    static ref RE_HEAD_CLOSE: Regex = Regex::new(r"(<( )*(/)( )*head( )*>)").unwrap();
    static ref RE_HEAD_SPAN: Regex = Regex::new(r"(<head>).*(</head>)").unwrap();
    static ref RE_SCRIPT_OPEN: Regex = Regex::new(r"<( )*script([^>])*>").unwrap();
    static ref RE_SCRIPT_CLOSE: Regex = Regex::new(r"(<( )*(/)( )*script( )*>)").unwrap();
    static ref RE_SCRIPT_SPAN: Regex = Regex::new(r"(<script>).*(</script>)").unwrap();
    static ref RE_STYLE_OPEN: Regex = Regex::new(r"<( )*style([^>])*>").unwrap();
    static ref RE_STYLE_CLOSE: Regex = Regex::new(r"(<( )*(/)( )*style( )*>)").unwrap();
    static ref RE_STYLE_SPAN: Regex = Regex::new(r"(<style>).*(</style>)").unwrap();
    static ref RE_SUP_CLOSE: Regex = Regex::new(r"(<( )*(/)( )*sup( )*>)").unwrap();
    static ref RE_SUP_OPEN: Regex = Regex::new(r"<( )*sup([^>])*>").unwrap();
    static ref RE_SUP_SPAN: Regex = Regex::new(r"(<sup>).*(</sup>)").unwrap();

    // Block-level tags.
    static ref RE_TD: Regex = Regex::new(r"<( )*td([^>])*>").unwrap();
    static ref RE_BR: Regex = Regex::new(r"<( )*br( )*>").unwrap();
    static ref RE_LI: Regex = Regex::new(r"<( )*li( )*>").unwrap();
    static ref RE_DIV: Regex = Regex::new(r"<( )*div([^>])*>").unwrap();
    static ref RE_TR: Regex = Regex::new(r"<( )*tr([^>])*>").unwrap();
    static ref RE_HEADING_OPEN: Regex = Regex::new(r"(<) h (\w+) >").unwrap();
    static ref RE_HEADING_CLOSE: Regex = Regex::new(r"(\b) (</) h (\w+) (>) (\b)").unwrap();
    static ref RE_P: Regex = Regex::new(r"<( )*p([^>])*>").unwrap();

    static ref RE_ANY_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref RE_ENTITY_JUNK: Regex = Regex::new(r"&(.{2,6});").unwrap();

    // Separator re-collapse.
    static ref RE_BREAK_SPACE_BREAK: Regex = Regex::new(r"(\r)( )+(\r)").unwrap();
    static ref RE_TAB_SPACE_TAB: Regex = Regex::new(r"(\t)( )+(\t)").unwrap();
    static ref RE_TAB_SPACE_BREAK: Regex = Regex::new(r"(\t)( )+(\r)").unwrap();
    static ref RE_BREAK_SPACE_TAB: Regex = Regex::new(r"(\r)( )+(\t)").unwrap();
    static ref RE_BREAK_TABS_BREAK: Regex = Regex::new(r"(\r)(\t)+(\r)").unwrap();
    static ref RE_BREAK_TABS: Regex = Regex::new(r"(\r)(\t)+").unwrap();
}

/// Strip HTML-flavored markup from `text`, producing plain text suitable for
/// a fixed-width console. Total over all inputs; malformed markup degrades
/// to best-effort rewriting rather than an error.
pub fn strip_markup(text: &str) -> String {
    // Carriage returns become spaces so they cannot collide with the break
    // character introduced below; tabs are dropped, space runs collapsed.
    let mut result = text.replace('\r', " ").replace('\t', "");
    result = RE_SPACE_RUNS.replace_all(&result, " ").into_owned();

    // Opaque blocks: head, script, style, then superscripts.
    result = RE_HEAD_OPEN.replace_all(&result, "<head>").into_owned();
    result = RE_HEAD_CLOSE.replace_all(&result, "</head>").into_owned();
    result = RE_HEAD_SPAN.replace_all(&result, "").into_owned();
    result = RE_SCRIPT_OPEN.replace_all(&result, "<script>").into_owned();
    result = RE_SCRIPT_CLOSE.replace_all(&result, "</script>").into_owned();
    result = RE_SCRIPT_SPAN.replace_all(&result, "").into_owned();
    result = RE_STYLE_OPEN.replace_all(&result, "<style>").into_owned();
    result = RE_STYLE_CLOSE.replace_all(&result, "</style>").into_owned();
    result = RE_STYLE_SPAN.replace_all(&result, "").into_owned();
    result = RE_SUP_CLOSE.replace_all(&result, "</sup>").into_owned();
    result = RE_SUP_OPEN.replace_all(&result, "<sup>").into_owned();
    result = RE_SUP_SPAN.replace_all(&result, "").into_owned();

    // Table cells become tabs.
    result = RE_TD.replace_all(&result, "\t").into_owned();

    // Line breaks for <br> and <li>, paragraph breaks for <div>, <tr>, <p>,
    // with the spaced "< h N >" heading form in between.
    result = RE_BR.replace_all(&result, "\r").into_owned();
    result = RE_LI.replace_all(&result, "\r").into_owned();
    result = RE_DIV.replace_all(&result, "\r\r").into_owned();
    result = RE_TR.replace_all(&result, "\r\r").into_owned();
    result = RE_HEADING_OPEN.replace_all(&result, "\r").into_owned();
    result = RE_HEADING_CLOSE.replace_all(&result, "").into_owned();
    result = RE_P.replace_all(&result, "\r\r").into_owned();

    // Anything else enclosed in <...> (anchors, images, comments) goes away.
    result = RE_ANY_TAG.replace_all(&result, "").into_owned();

    // Console-friendly literal substitutions. These run before the entity
    // table and shadow its entries for the same names.
    result = result
        .replace("&bull;", " * ")
        .replace("&lsaquo;", "<")
        .replace("&rsaquo;", ">")
        .replace("&trade;", "(tm)")
        .replace("&frasl;", "/")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&copy;", "(c)")
        .replace("&reg;", "(r)");

    result = decode_named_entities(&result);

    // Whatever still looks like an entity reference is malformed or
    // unsupported; drop it rather than show raw ampersand syntax.
    result = RE_ENTITY_JUNK.replace_all(&result, "").into_owned();

    // Squeeze spaces trapped between separators, then fold tab runs that
    // ended up between breaks.
    result = RE_BREAK_SPACE_BREAK.replace_all(&result, "\r\r").into_owned();
    result = RE_TAB_SPACE_TAB.replace_all(&result, "\t\t").into_owned();
    result = RE_TAB_SPACE_BREAK.replace_all(&result, "\t\r").into_owned();
    result = RE_BREAK_SPACE_TAB.replace_all(&result, "\r\t").into_owned();
    result = RE_BREAK_TABS_BREAK.replace_all(&result, "\r\r").into_owned();
    result = RE_BREAK_TABS.replace_all(&result, "\r\t").into_owned();

    result
}

// Single left-to-right pass; a decoded character is never re-examined, so
// "&amp;copy;" yields the text "&copy;" rather than cascading into "(c)".
fn decode_named_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if !rest.starts_with('&') {
            match rest.find('&') {
                Some(n) => {
                    out.push_str(&rest[..n]);
                    i += n;
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            }
            continue;
        }
        match rest.find(';') {
            Some(semi) => {
                if let Some(ch) = lookup_entity(&rest[1..semi]) {
                    out.push(ch);
                    i += semi + 1;
                } else {
                    // Unknown reference; keep the ampersand and let the
                    // cleanup stage decide what happens to the token.
                    out.push('&');
                    i += 1;
                }
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    out
}
