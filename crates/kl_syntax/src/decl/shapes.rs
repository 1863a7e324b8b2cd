/// Declaration recognizers.
///
/// One method per declaration shape. Each returns `None` for a declaration that fails its
/// `is_valid()` predicate; the cursor has still moved past whatever was consumed.
impl<'a> Extractor<'a> {
    // ========================================================================
    // require / const
    // ========================================================================

    /// `require Name[, Name...];`
    fn require(&mut self) {
        self.advance();
        while !self.is_at_end() && !self.check(SymbolKind::Semicolon) {
            if self.check(SymbolKind::Name) {
                self.decls.requires.push(self.text().to_string());
            }
            self.advance();
        }
        self.advance();
    }

    /// `const Type name = value;`
    fn constant(&mut self) -> Option<Constant> {
        let symbol = self.pos;
        self.advance();
        let ty = self.take_text();
        let name = self.take_text();
        if self.check(SymbolKind::Assignment) {
            self.advance();
        }
        let mut value = String::new();
        while !self.is_at_end() && !self.check(SymbolKind::Semicolon) {
            value.push_str(self.text());
            self.advance();
        }
        self.advance();

        let constant = Constant {
            symbol,
            comments: self.store.comments_before(symbol),
            ty,
            name,
            value,
        };
        keep_valid(constant.is_valid(), "const", constant)
    }

    // ========================================================================
    // struct / object / interface
    // ========================================================================

    /// `struct Name [: Interface...] { Type member [suffix...]; ... }`
    fn structure(&mut self) -> Option<Struct> {
        let symbol = self.pos;
        let kind = if self.peek() == SymbolKind::Keyword(KeywordId::Object) {
            StructKind::Object
        } else {
            StructKind::Struct
        };
        self.advance();
        let name = if self.check(SymbolKind::Name) { self.take_text() } else { String::new() };

        let mut interfaces = Vec::new();
        let mut in_interfaces = false;
        loop {
            match self.peek() {
                _ if self.is_at_end() => return None,
                SymbolKind::CurlyOpen => break,
                // Forward declaration `struct Name;`
                SymbolKind::Semicolon => {
                    self.advance();
                    return None;
                }
                SymbolKind::Arithmetic if self.text() == ":" => in_interfaces = true,
                SymbolKind::Name if in_interfaces => interfaces.push(self.text().to_string()),
                _ => {}
            }
            self.advance();
        }
        self.advance();

        let mut members = Vec::new();
        while !self.is_at_end() && !self.check(SymbolKind::CurlyClose) {
            if let Some(member) = self.member() {
                members.push(member);
            }
        }
        self.advance();

        let structure = Struct {
            symbol,
            comments: self.store.comments_before(symbol),
            kind,
            name,
            interfaces,
            members,
        };
        keep_valid(structure.is_valid(), kind.as_str(), structure)
    }

    /// `Type name [suffix...];` inside a struct body. Stops before a `}`.
    fn member(&mut self) -> Option<Member> {
        let mut ty = self.take_text();
        let symbol = self.pos;
        let name = self.take_text();
        while !self.is_at_end() && !matches!(self.peek(), SymbolKind::Semicolon | SymbolKind::CurlyClose) {
            ty.push_str(self.text());
            self.advance();
        }
        if self.check(SymbolKind::Semicolon) {
            self.advance();
        }
        (!ty.is_empty() && !name.is_empty()).then_some(Member { symbol, ty, name })
    }

    /// `interface Name { Type method(arguments); ... }`
    fn interface(&mut self) -> Option<Interface> {
        let symbol = self.pos;
        self.advance();
        let name = if self.check(SymbolKind::Name) { self.take_text() } else { String::new() };
        self.advance_to(&[SymbolKind::CurlyOpen, SymbolKind::Semicolon]);
        if !self.check(SymbolKind::CurlyOpen) {
            self.advance();
            return None;
        }
        self.advance();

        let mut functions = Vec::new();
        while !self.is_at_end() && !self.check(SymbolKind::CurlyClose) {
            if self.check(SymbolKind::Semicolon) {
                self.advance();
                continue;
            }
            let start = self.pos;
            if let Some(function) = self.function(false) {
                functions.push(function);
            }
            if self.pos <= start {
                self.advance();
            }
        }
        self.advance();

        let interface = Interface {
            symbol,
            comments: self.store.comments_before(symbol),
            name,
            functions,
        };
        keep_valid(interface.is_valid(), "interface", interface)
    }

    // ========================================================================
    // operator / function
    // ========================================================================

    /// `operator name[<<<pex>>>](arguments) { body }`
    fn operator(&mut self) -> Option<Operator> {
        let symbol = self.pos;
        self.advance();
        let name = if self.check(SymbolKind::Name) { self.take_text() } else { String::new() };

        let mut pex_argument = String::new();
        if self.check(SymbolKind::PexOpen) {
            self.advance();
            let first = self.pos;
            self.advance_to(&[SymbolKind::PexClose, SymbolKind::BraceOpen, SymbolKind::CurlyOpen]);
            pex_argument = self.source_between(first, self.pos);
            if self.check(SymbolKind::PexClose) {
                self.advance();
            }
        }

        let arguments = self.argument_list();
        self.advance_to(&[SymbolKind::CurlyOpen, SymbolKind::Semicolon]);
        let body = if self.check(SymbolKind::CurlyOpen) {
            Some(self.body())
        } else {
            self.advance();
            None
        };

        let operator = Operator {
            symbol,
            comments: self.store.comments_before(symbol),
            name,
            pex_argument,
            arguments,
            body,
        };
        keep_valid(operator.is_valid(), "operator", operator)
    }

    /// A function declaration, optionally introduced by `function`/`inline`.
    ///
    /// The number of symbols before `(` decides the shape:
    ///
    /// | symbols | shape |
    /// |---------|-------|
    /// | 1 | `name` |
    /// | 2 | `Type name` |
    /// | 3 | `Owner . name` |
    /// | 4 | `Type Owner . name` |
    /// | more | first `.` separates `Owner` and `name`, everything before is the type |
    fn function(&mut self, keyword: bool) -> Option<Function> {
        let symbol = self.pos;
        if keyword {
            self.advance();
        }

        let mut parts: Vec<&'a str> = Vec::new();
        loop {
            match self.peek() {
                _ if self.is_at_end() => return None,
                SymbolKind::BraceOpen => break,
                SymbolKind::Semicolon | SymbolKind::CurlyOpen | SymbolKind::CurlyClose => return None,
                SymbolKind::Arithmetic if self.text().chars().all(chars::is_method_modifier) => {}
                _ => parts.push(self.text()),
            }
            self.advance();
        }
        let (ty, owner, name) = function_shape(&parts);

        let arguments = self.argument_list();
        let mut body = None;
        while !self.is_at_end() {
            match self.peek() {
                SymbolKind::CurlyOpen => {
                    body = Some(self.body());
                    break;
                }
                SymbolKind::Semicolon | SymbolKind::String => {
                    body = Some(BodyRange::single(self.pos));
                    self.advance();
                    break;
                }
                // End of the enclosing interface.
                SymbolKind::CurlyClose => break,
                _ => self.advance(),
            }
        }

        let function = Function {
            symbol,
            comments: self.store.comments_before(symbol),
            ty,
            owner,
            name,
            arguments,
            body,
        };
        keep_valid(function.is_valid(), "function", function)
    }

    // ========================================================================
    // Arguments
    // ========================================================================

    /// `( [in|io] Type[<...>] Name [suffix...], ... )`
    ///
    /// Starts anywhere before the `(`; does not look past a `{` or `;`.
    fn argument_list(&mut self) -> ArgumentList {
        let mut list = ArgumentList::default();
        self.advance_to(&[SymbolKind::BraceOpen, SymbolKind::CurlyOpen, SymbolKind::Semicolon]);
        if !self.check(SymbolKind::BraceOpen) {
            return list;
        }
        self.advance();

        while !self.is_at_end() {
            match self.peek() {
                SymbolKind::BraceClose => {
                    self.advance();
                    break;
                }
                SymbolKind::Comma => self.advance(),
                SymbolKind::CurlyOpen | SymbolKind::Semicolon => break,
                _ => {
                    if let Some(argument) = self.argument() {
                        list.arguments.push(argument);
                    }
                }
            }
        }
        list
    }

    /// One argument, leaving the cursor on the following `,` or `)`.
    fn argument(&mut self) -> Option<Argument> {
        const STOP: &[SymbolKind] = &[
            SymbolKind::Comma,
            SymbolKind::BraceClose,
            SymbolKind::CurlyOpen,
            SymbolKind::Semicolon,
        ];
        let is_stop = |kind: SymbolKind| STOP.contains(&kind);

        let mode = match self.peek() {
            SymbolKind::Keyword(KeywordId::Io) => {
                self.advance();
                ArgMode::Io
            }
            SymbolKind::Keyword(KeywordId::In) => {
                self.advance();
                ArgMode::In
            }
            _ => ArgMode::default(),
        };

        let mut ty = String::new();
        if !self.is_at_end() && !is_stop(self.peek()) {
            ty.push_str(self.text());
            self.advance();
        }
        // Sliced suffix `<...>`, balanced on its own closer.
        if self.check(SymbolKind::Arithmetic) && self.text().starts_with('<') {
            let mut depth = 0i32;
            while !self.is_at_end() && !is_stop(self.peek()) {
                let text = self.text();
                depth += text.matches('<').count() as i32 - text.matches('>').count() as i32;
                ty.push_str(text);
                self.advance();
                if depth <= 0 {
                    break;
                }
            }
        }

        let symbol = self.pos;
        let name = if !self.is_at_end() && !is_stop(self.peek()) {
            let name = self.text().to_string();
            self.advance();
            name
        } else {
            String::new()
        };
        while !self.is_at_end() && !is_stop(self.peek()) {
            ty.push_str(self.text());
            self.advance();
        }

        (!ty.is_empty() && !name.is_empty()).then_some(Argument { symbol, mode, ty, name })
    }

    /// Source text from the start of symbol `first` to the end of the symbol before `end`.
    fn source_between(&self, first: usize, end: usize) -> String {
        if end <= first {
            return String::new();
        }
        match (self.store.get(first), self.store.get(end - 1)) {
            (Some(from), Some(last)) => self
                .store
                .source()
                .get(from.start()..last.end())
                .unwrap_or("")
                .to_string(),
            _ => String::new(),
        }
    }
}

/// Split the symbols before `(` into `(type, owner, name)`.
fn function_shape(parts: &[&str]) -> (String, String, String) {
    let period = parts.iter().position(|p| *p == ".");
    match (parts.len(), period) {
        (0, _) => (String::new(), String::new(), String::new()),
        (1, _) => (String::new(), String::new(), parts[0].to_string()),
        (2, _) => (parts[0].to_string(), String::new(), parts[1].to_string()),
        (3, Some(1)) => (String::new(), parts[0].to_string(), parts[2].to_string()),
        (4, Some(2)) => (parts[0].to_string(), parts[1].to_string(), parts[3].to_string()),
        (n, Some(p)) if p > 0 && p + 1 < n => (
            parts[..p - 1].concat(),
            parts[p - 1].to_string(),
            parts[p + 1].to_string(),
        ),
        (n, _) => (parts[..n - 1].concat(), String::new(), parts[n - 1].to_string()),
    }
}

fn keep_valid<T>(valid: bool, what: &'static str, decl: T) -> Option<T> {
    if !valid {
        tracing::debug!(what, "dropped incomplete declaration");
    }
    valid.then_some(decl)
}
