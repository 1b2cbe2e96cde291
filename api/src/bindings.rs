//! TypeScript bindings generation for frontend types.
//!
//! This module exports the game wire types to TypeScript using ts-rs.
//! Enable with the `ts-bindings` feature flag.

// Re-export types with TS derive when feature is enabled
#[cfg(feature = "ts-bindings")]
mod ts_types {
    use ts_rs::TS;

    /// TypeScript export for Color
    #[derive(TS)]
    #[ts(export, export_to = "../web/src/generated/")]
    #[allow(dead_code)]
    pub enum ColorTS {
        #[ts(rename = "red")]
        Red,
        #[ts(rename = "green")]
        Green,
        #[ts(rename = "violet")]
        Violet,
    }

    /// TypeScript export for one history entry
    #[derive(TS)]
    #[ts(export, export_to = "../web/src/generated/")]
    #[allow(dead_code)]
    pub struct PastResultTS {
        pub round_id: u64,
        pub color: ColorTS,
    }

    /// TypeScript export for the status endpoint body
    #[derive(TS)]
    #[ts(export, export_to = "../web/src/generated/")]
    #[allow(dead_code)]
    pub struct GameStatusTS {
        pub success: bool,
        /// The round currently open for wagers
        pub current_round_id: u64,
        /// Seconds until the open round is due for settlement
        pub time_remaining: i64,
        /// Settled rounds, most recent first
        pub past_results: Vec<PastResultTS>,
    }

    /// TypeScript export for the predict request body
    #[derive(TS)]
    #[ts(export, export_to = "../web/src/generated/")]
    #[allow(dead_code)]
    pub struct WagerTS {
        pub prediction: ColorTS,
        pub amount: u64,
    }
}
