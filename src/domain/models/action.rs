pub enum Action {
    TurnRequest(String),
    SessionList(),
    SessionChange(String),
    SessionRemove(String),
    DocumentUpload(Vec<String>),
}
