use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// One tokenizer event, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TocEvent<'a> {
    Start {
        tag: &'a str,
        attrs: Vec<(&'a str, &'a str)>,
    },
    End {
        tag: &'a str,
    },
    Text(&'a str),
}

/// Tokenizes `html` permissively and reports start tags, end tags and text.
///
/// Only end tags written in the source are reported; omitted closes such as
/// an unclosed `<li>` produce no `End`. Adjacent character runs are merged,
/// so a tag's text arrives as one `Text` before the next tag.
pub fn for_each_event<F>(html: &str, callback: F)
where
    F: FnMut(TocEvent<'_>),
{
    let mut input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let mut tokenizer = Tokenizer::new(EventSink::new(callback), TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();
}

struct EventSink<F> {
    callback: F,
    text: String,
}

impl<F> EventSink<F>
where
    F: FnMut(TocEvent<'_>),
{
    fn new(callback: F) -> Self {
        Self {
            callback,
            text: String::new(),
        }
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        (self.callback)(TocEvent::Text(&self.text));
        self.text.clear();
    }

    fn emit_tag(&mut self, tag: &Tag) -> TokenSinkResult<()> {
        let name: &str = &tag.name;
        match tag.kind {
            TagKind::StartTag => {
                (self.callback)(TocEvent::Start {
                    tag: name,
                    attrs: tag
                        .attrs
                        .iter()
                        .map(|attr| (&*attr.name.local, &*attr.value))
                        .collect(),
                });
                if tag.self_closing {
                    return TokenSinkResult::Continue;
                }
                match name {
                    "script" => TokenSinkResult::RawData(RawKind::ScriptData),
                    "style" => TokenSinkResult::RawData(RawKind::Rawtext),
                    _ => TokenSinkResult::Continue,
                }
            }
            TagKind::EndTag => {
                (self.callback)(TocEvent::End { tag: name });
                TokenSinkResult::Continue
            }
        }
    }
}

impl<F> TokenSink for EventSink<F>
where
    F: FnMut(TocEvent<'_>),
{
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(chars) => {
                self.text.push_str(&chars);
                TokenSinkResult::Continue
            }
            Token::NullCharacterToken | Token::ParseError(_) => TokenSinkResult::Continue,
            Token::TagToken(tag) => {
                self.flush_text();
                self.emit_tag(&tag)
            }
            _ => {
                self.flush_text();
                TokenSinkResult::Continue
            }
        }
    }

    fn end(&mut self) {
        self.flush_text();
    }
}
