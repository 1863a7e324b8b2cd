/// Variable declarations.
///
/// Runs after the declaration scan, over the whole symbol stream including bodies and argument
/// lists: a type name (`rt`) followed by comma-separated names declares one variable per name.
/// Array and numeric suffixes (`Scalar v[3]`) belong to the type.
impl<'a> Extractor<'a> {
    fn variables(&mut self) {
        let store = self.store;
        let mut i = 0;
        while i < store.len() {
            if store.kind(i) != SymbolKind::Rt || follows_function_keyword(store, i) {
                i += 1;
                continue;
            }
            let base = store.text(i);
            let mut resume = i + 1;
            let mut cursor = store.next(i, true);
            while let Some(name) = cursor.filter(|j| store.kind(*j) == SymbolKind::Name) {
                let mut ty = base.to_string();
                let mut next = store.next(name, true);
                while let Some(j) = next.filter(|j| is_type_suffix(store.kind(*j))) {
                    ty.push_str(store.text(j));
                    next = store.next(j, true);
                }
                let variable = Variable {
                    symbol: name,
                    ty,
                    name: store.text(name).to_string(),
                };
                if variable.is_valid() {
                    self.decls.variables.push(variable);
                }
                // Resume on the symbol that ended the declaration.
                resume = next.unwrap_or(store.len());
                cursor = next
                    .filter(|j| store.kind(*j) == SymbolKind::Comma)
                    .and_then(|comma| store.next(comma, true));
            }
            i = resume.max(i + 1);
        }
    }
}

fn follows_function_keyword(store: &SymbolStore, index: usize) -> bool {
    store
        .prev(index, true)
        .is_some_and(|prev| store.kind(prev).introduces_function())
}

fn is_type_suffix(kind: SymbolKind) -> bool {
    matches!(
        kind,
        SymbolKind::BracketOpen | SymbolKind::BracketClose | SymbolKind::Number | SymbolKind::Name
    )
}
