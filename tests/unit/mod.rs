mod support;

mod test_dispatch;
