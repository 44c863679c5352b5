mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;
