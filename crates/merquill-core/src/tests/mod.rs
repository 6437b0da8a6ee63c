mod builders;
mod flowchart;
mod validate;
