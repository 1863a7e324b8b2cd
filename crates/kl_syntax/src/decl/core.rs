/// Extractor state.
///
/// ## Notes
/// - `pos` always rests on a non-comment symbol (or one past the end).
/// - Recognizers start on their introducing symbol and leave `pos` after what they consumed.
///   The top-level loop guarantees progress even if a recognizer consumed nothing.
struct Extractor<'a> {
    store: &'a SymbolStore,
    pos: usize,
    decls: Declarations,
}

impl<'a> Extractor<'a> {
    fn new(store: &'a SymbolStore) -> Self {
        let mut extractor = Self {
            store,
            pos: 0,
            decls: Declarations::default(),
        };
        extractor.skip_comments();
        extractor
    }

    fn extract(mut self) -> Declarations {
        while !self.is_at_end() {
            let start = self.pos;
            match self.peek() {
                SymbolKind::Keyword(KeywordId::Require) => self.require(),
                SymbolKind::Keyword(KeywordId::Const) => {
                    if let Some(constant) = self.constant() {
                        self.decls.constants.push(constant);
                    }
                }
                SymbolKind::Keyword(KeywordId::Interface) => {
                    if let Some(interface) = self.interface() {
                        self.decls.interfaces.push(interface);
                    }
                }
                SymbolKind::Keyword(KeywordId::Struct | KeywordId::Object) => {
                    if let Some(structure) = self.structure() {
                        self.decls.structs.push(structure);
                    }
                }
                SymbolKind::Keyword(KeywordId::Operator) => {
                    if let Some(operator) = self.operator() {
                        self.decls.operators.push(operator);
                    }
                }
                kind if kind.introduces_function() => {
                    if let Some(function) = self.function(true) {
                        self.decls.functions.push(function);
                    }
                }
                _ => self.advance(),
            }
            if self.pos <= start {
                self.pos = start;
                self.advance();
            }
        }

        self.variables();
        self.decls
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.pos >= self.store.len()
    }

    fn peek(&self) -> SymbolKind {
        self.store.kind(self.pos)
    }

    fn check(&self, kind: SymbolKind) -> bool {
        !self.is_at_end() && self.peek() == kind
    }

    fn text(&self) -> &'a str {
        self.store.text(self.pos)
    }

    /// Move to the next non-comment symbol.
    fn advance(&mut self) {
        self.pos = self.store.next(self.pos, true).unwrap_or(self.store.len());
    }

    fn skip_comments(&mut self) {
        if self.check(SymbolKind::Comment) {
            self.advance();
        }
    }

    /// Take the current symbol's text and advance, unless it terminates the statement.
    fn take_text(&mut self) -> String {
        if self.is_at_end()
            || matches!(
                self.peek(),
                SymbolKind::Semicolon | SymbolKind::CurlyOpen | SymbolKind::CurlyClose
            )
        {
            return String::new();
        }
        let text = self.text().to_string();
        self.advance();
        text
    }

    /// Advance until the current symbol is one of `kinds` (or the end).
    fn advance_to(&mut self, kinds: &[SymbolKind]) {
        while !self.is_at_end() && !kinds.contains(&self.peek()) {
            self.advance();
        }
    }

    /// Body starting at the current `{`, leaving the cursor after the matching `}`.
    ///
    /// An unterminated body extends to the last symbol.
    fn body(&mut self) -> BodyRange {
        let start = self.pos;
        let end = self
            .store
            .matching_close(start, SymbolKind::CurlyOpen, SymbolKind::CurlyClose)
            .unwrap_or(self.store.len().saturating_sub(1));
        self.pos = end;
        self.advance();
        BodyRange { start, end }
    }
}

/// Extract the declarations of a lexed unit.
#[tracing::instrument(skip_all, fields(symbol_count = store.len()))]
pub fn extract(store: &SymbolStore) -> Declarations {
    let decls = Extractor::new(store).extract();
    tracing::trace!(
        functions = decls.functions.len(),
        structs = decls.structs.len(),
        variables = decls.variables.len(),
        "extracted"
    );
    decls
}
