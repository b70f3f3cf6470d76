use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub enum Message {
    // === ENTRY MESSAGES ===
    Greeting(String),
    AlreadyStarted(String), // date
    EntryAdded(String, String), // project, tasks
    BreakAdded,
    NothingAdded,
    EntryUpdated(i64),
    NoEntriesToday,
    NoChangesDetected,
    ConfirmAmend,
    ConfirmStretch(String, String, String), // project, old time, new time
    OperationCancelled,

    // === FAVORITE MESSAGES ===
    NoFavorites,
    FavoritesHeader,

    // === REPORT MESSAGES ===
    ReportHeader(NaiveDate, NaiveDate),
    NoEntriesInWindow,
    SinceLastEntry(String),
    TotalTime(String, String),        // compact, long form suffix
    TotalWorkingTime(String, String), // compact, long form suffix
    TotalBreakTime(String),
    SectionByProject,
    SectionByTask,
    SectionByEntry,
    SectionByDay,
    StatisticsHeader,

    // === PUSH MESSAGES ===
    NothingToPush,
    UnpushedHeader(usize),
    PushPreviewHeader(usize),
    PushPreviewItem(i64, String, String), // entry id, browse url, duration
    ConfirmPush(usize),
    EntryPushed(i64, String),
    PushCompleted(usize),

    // === EXPORT MESSAGES ===
    ExportCompleted(String),

    // === MAINTENANCE MESSAGES ===
    NothingToPurge,
    PurgeDryRun(i64),
    ConfirmPurge(i64),
    ConfirmPurgeIrreversible,
    ConfirmPurgeFinal,
    ArchiveWritten(String),
    EntriesPurged(usize),
    BackupCreated(String),
    BackupExists(String),
    DatabaseNotFound(String),

    // === CONFIG MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleDatabase,
    ConfigModuleReport,
    ConfigModuleFavorites(usize),
    ConfigModuleJira,
    InvalidWeekday(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptDatabaseFile,
    PromptRoundToMinutes,
    PromptWeekStart,
    PromptRequireNote,
    PromptSplitWorkFromBreak,
    PromptShowByDayTotals,
    Prompt24hFormat,
    PromptHmsAbbreviated,
    PromptClearFavorites,
    PromptFavorite,
    PromptFavoriteDescription,
    PromptFavoriteTicket,
    PromptFavoriteUrl,
    PromptJiraUsername,
    PromptJiraApiUrl,
    PromptJiraApiKey,
    PromptSelectFavorite,
    PromptSelectEntry,
    PromptProject,
    PromptTask,
    PromptNote,
    PromptUrl,
    PromptDateTime,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationHistoryItem(u32, String, String), // version, name, applied at
}
