mod thread_record;

pub use thread_record::ThreadRecord;
