//! Order side channels driven by the event bus

pub mod dispatcher;
pub mod printer;
pub mod whatsapp;

pub use dispatcher::spawn_dispatcher;
pub use printer::ReceiptPrinter;
pub use whatsapp::WhatsappNotifier;
