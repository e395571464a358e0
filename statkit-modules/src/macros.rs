//! Helper macros for namespace adapters.

/// Expands to one async method per report that takes only a
/// [`statkit_core::ReportQuery`].
macro_rules! report_methods {
    ($($(#[$meta:meta])* $name:ident => $remote:literal;)*) => {
        $(
            $(#[$meta])*
            pub async fn $name(&self, query: &::statkit_core::ReportQuery) -> S::Output {
                ::statkit_fetch::RequestSink::send(
                    &self.sink,
                    $remote,
                    ::statkit_core::ToParams::to_params(query),
                )
                .await
            }
        )*
    };
}

/// Expands to one async method per parameterless remote call.
macro_rules! bare_methods {
    ($($(#[$meta:meta])* $name:ident => $remote:literal;)*) => {
        $(
            $(#[$meta])*
            pub async fn $name(&self) -> S::Output {
                ::statkit_fetch::RequestSink::send(
                    &self.sink,
                    $remote,
                    ::statkit_core::Params::new(),
                )
                .await
            }
        )*
    };
}

/// Expands to one async method per subtable report (`idSubtable` plus the
/// report query).
macro_rules! subtable_methods {
    ($($(#[$meta:meta])* $name:ident => $remote:literal;)*) => {
        $(
            $(#[$meta])*
            pub async fn $name(
                &self,
                query: &::statkit_core::ReportQuery,
                id_subtable: u32,
            ) -> S::Output {
                let mut params = ::statkit_core::ToParams::to_params(query);
                params.insert("idSubtable", id_subtable);
                ::statkit_fetch::RequestSink::send(&self.sink, $remote, params).await
            }
        )*
    };
}
